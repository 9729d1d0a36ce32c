//! The vibration window.

use std::time::Duration;

use eframe::egui;
use tokio::runtime::Handle;

use crate::vibration::{percent_label, Motor, RumbleState, Session};

/// Upper bound between repaints so poller-driven changes show up
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

const SLIDER_WIDTH: f32 = 250.0;
const TOGGLE_SIZE: [f32; 2] = [200.0, 36.0];

/// Text of the start/stop button for the given activation.
#[must_use]
pub fn toggle_label(active: bool) -> &'static str {
    if active {
        "Stop Vibration"
    } else {
        "Start Vibration"
    }
}

/// Controller status line.
#[must_use]
pub fn status_text(connected: bool, slot: u32) -> String {
    if connected {
        format!("Controller connected (slot {})", slot)
    } else {
        format!("No controller detected (slot {})", slot)
    }
}

/// eframe application showing one [`Session`].
pub struct RumbleApp {
    session: Session,
    runtime: Handle,
    slot: u32,
}

impl RumbleApp {
    pub fn new(session: Session, runtime: Handle, slot: u32) -> Self {
        Self {
            session,
            runtime,
            slot,
        }
    }

    fn toggle(&self) {
        let session = self.session.clone();
        // Runs on the runtime so the UI thread never waits on the driver join
        self.runtime.spawn(async move {
            session.toggle().await;
        });
    }

    fn motor_panel(&self, ui: &mut egui::Ui, state: &RumbleState, motor: Motor) {
        let current = *state.motor(motor);

        ui.vertical_centered(|ui| {
            let mut enabled = current.enabled;
            if ui.checkbox(&mut enabled, motor.label()).changed() {
                self.session.set_enabled(motor, enabled);
            }

            ui.label("Intensity");

            let mut intensity = current.intensity;
            let slider = egui::Slider::new(&mut intensity, 0.0..=1.0).show_value(false);
            if ui.add_sized([SLIDER_WIDTH, 20.0], slider).changed() {
                self.session.set_intensity(motor, intensity);
            }

            ui.label(percent_label(intensity));
        });
    }
}

impl eframe::App for RumbleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.session.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                let button = egui::Button::new(toggle_label(state.active));
                if ui.add_sized(TOGGLE_SIZE, button).clicked() {
                    self.toggle();
                }

                ui.add_space(8.0);
                let color = if state.connected {
                    egui::Color32::from_rgb(0x4c, 0xaf, 0x50)
                } else {
                    egui::Color32::from_rgb(0xe5, 0x73, 0x73)
                };
                ui.colored_label(color, status_text(state.connected, self.slot));
            });

            ui.add_space(20.0);
            ui.columns(2, |columns| {
                for (column, motor) in columns.iter_mut().zip(Motor::ALL) {
                    self.motor_panel(column, &state, motor);
                }
            });
        });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
