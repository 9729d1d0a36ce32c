//! # UI Module
//!
//! One `eframe` window: a start/stop button, the controller status and a
//! panel per motor with enable checkbox, intensity slider and percentage.
//!
//! Every frame reads a fresh [`Session`] snapshot, so changes made by the
//! controller shortcuts appear without any extra wiring.

pub mod app;

use eframe::egui;
use tokio::runtime::Handle;

use crate::config::WindowConfig;
use crate::vibration::Session;

pub use app::RumbleApp;

/// Open the window and block until it is closed.
///
/// # Errors
///
/// Returns the `eframe` error if the native window cannot be created.
pub fn run(
    window: &WindowConfig,
    session: Session,
    runtime: Handle,
    slot: u32,
) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height]),
        ..Default::default()
    };

    let app = RumbleApp::new(session, runtime, slot);
    eframe::run_native(
        &window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
