//! # Input Poller
//!
//! Reads the controller at a fixed rate and turns button and trigger presses
//! into changes on the vibration [`Session`].
//!
//! A tick that finds no controller is skipped entirely: latches keep their
//! values and the next tick simply asks again.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::bindings::{Action, Input, InputLatches};
use crate::config::Config;
use crate::pad::{Gamepad, GamepadState};
use crate::vibration::Session;

/// Polls one controller slot and dispatches shortcut actions.
pub struct InputPoller {
    pad: Arc<dyn Gamepad>,
    session: Session,
    slot: u32,
    poll_interval: Duration,
    step: f32,
    preset_intensity: f32,
    latches: InputLatches,
}

impl InputPoller {
    pub fn new(
        pad: Arc<dyn Gamepad>,
        session: Session,
        slot: u32,
        poll_interval: Duration,
        step: f32,
        preset_intensity: f32,
    ) -> Self {
        Self {
            pad,
            session,
            slot,
            poll_interval,
            step,
            preset_intensity,
            latches: InputLatches::new(),
        }
    }

    /// Build a poller from the `[controller]` and `[vibration]` sections.
    pub fn from_config(pad: Arc<dyn Gamepad>, session: Session, config: &Config) -> Self {
        Self::new(
            pad,
            session,
            config.controller.slot,
            Duration::from_millis(config.controller.poll_interval_ms),
            config.vibration.step,
            config.vibration.preset_intensity,
        )
    }

    /// Poll forever. Runs until the task is aborted, see [`shutdown`].
    pub async fn run(mut self) {
        info!(
            "Polling controller slot {} every {}ms",
            self.slot,
            self.poll_interval.as_millis()
        );

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Run a single poll tick.
    pub async fn poll_once(&mut self) {
        let state = self.pad.state(self.slot);

        if self.session.set_connected(state.is_some()) {
            match state {
                Some(_) => info!("Controller connected on slot {}", self.slot),
                None => info!("No controller on slot {}", self.slot),
            }
        }

        if let Some(state) = state {
            self.handle_state(&state).await;
        }
    }

    async fn handle_state(&mut self, state: &GamepadState) {
        for input in self.latches.rising_edges(state) {
            let action = input.action(self.step);
            debug!("{:?} pressed: {:?}", input, action);
            self.dispatch(input, action).await;
        }
    }

    async fn dispatch(&self, input: Input, action: Action) {
        match action {
            Action::ToggleVibration => {
                let active = self.session.toggle().await;
                debug!("{:?} toggled vibration {}", input, if active { "on" } else { "off" });
            }
            Action::Preset => self.session.preset(self.preset_intensity),
            Action::Nudge(motor, delta) => self.session.nudge(motor, delta),
        }
    }
}

/// Stop the poller task, then stop vibration.
///
/// The poller goes first so a shortcut press cannot restart the driver
/// after the final zero write.
pub async fn shutdown(poller: JoinHandle<()>, session: &Session) {
    poller.abort();
    if let Err(e) = poller.await {
        if !e.is_cancelled() {
            debug!("Input poller ended abnormally: {}", e);
        }
    }
    session.stop().await;
}
