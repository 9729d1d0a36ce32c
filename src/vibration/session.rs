//! # Vibration Session
//!
//! Owns the shared [`RumbleState`] and the output loop that pushes it to the
//! controller.
//!
//! ## Activation
//!
//! ```text
//!            start / toggle
//!  Inactive ─────────────────▶ Active      (spawns the driver task)
//!     ▲                          │
//!     └──────────────────────────┘
//!            stop / toggle                 (joins the driver, writes 0,0)
//! ```
//!
//! While active the driver writes the current motor speeds every
//! `drive_interval`. Every state change made through the session is also
//! written at once, so edits never wait for the next tick.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::motor::Motor;
use super::state::RumbleState;
use crate::pad::Gamepad;

struct Inner {
    pad: Arc<dyn Gamepad>,
    slot: u32,
    drive_interval: Duration,
    state: Mutex<RumbleState>,
    driver: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, RumbleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> RumbleState {
        *self.lock()
    }

    /// Write `state` if it is active. Call with the state lock held.
    fn write_if_active(&self, state: &RumbleState) {
        if state.active {
            let (left, right) = state.motor_speeds();
            self.write(left, right);
        }
    }

    /// Fire-and-forget device write
    fn write(&self, left: u16, right: u16) {
        if let Err(e) = self.pad.set_vibration(self.slot, left, right) {
            debug!("Failed to set vibration ({}, {}): {}", left, right, e);
        }
    }
}

/// Cloneable handle to the shared vibration state.
///
/// The window, the input poller and `main` each hold a clone.
///
/// # Examples
///
/// ```no_run
/// use pad_rumble::vibration::{Motor, Session};
/// use std::time::Duration;
///
/// # async fn run() -> pad_rumble::error::Result<()> {
/// let session = Session::new(pad_rumble::pad::open()?, 0, Duration::from_millis(100));
/// session.set_intensity(Motor::Left, 0.5);
/// session.start().await;
/// tokio::time::sleep(Duration::from_secs(1)).await;
/// session.stop().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("slot", &self.inner.slot)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create an inactive session with both motors enabled at zero.
    pub fn new(pad: Arc<dyn Gamepad>, slot: u32, drive_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                pad,
                slot,
                drive_interval,
                state: Mutex::new(RumbleState::default()),
                driver: tokio::sync::Mutex::new(None),
            }),
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> RumbleState {
        self.inner.snapshot()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.lock().active
    }

    /// Enable or disable one motor. The stored intensity is kept.
    pub fn set_enabled(&self, motor: Motor, enabled: bool) {
        self.update(|state| state.motor_mut(motor).enabled = enabled);
    }

    /// Set one motor's intensity, clamped to `[0.0, 1.0]`.
    pub fn set_intensity(&self, motor: Motor, intensity: f32) {
        self.update(|state| state.motor_mut(motor).set_intensity(intensity));
    }

    /// Move one motor's intensity by `delta`, clamped to `[0.0, 1.0]`.
    pub fn nudge(&self, motor: Motor, delta: f32) {
        self.update(|state| state.motor_mut(motor).nudge(delta));
    }

    /// Set both motors to the same intensity.
    pub fn preset(&self, intensity: f32) {
        self.update(|state| {
            for motor in Motor::ALL {
                state.motor_mut(motor).set_intensity(intensity);
            }
        });
    }

    /// Record whether a controller answered the last poll.
    ///
    /// Returns true when this changes the recorded value.
    pub fn set_connected(&self, connected: bool) -> bool {
        let mut state = self.inner.lock();
        let changed = state.connected != connected;
        state.connected = connected;
        changed
    }

    /// Push the current state to the device once if vibration is active.
    pub fn apply(&self) {
        let state = self.inner.lock();
        self.inner.write_if_active(&state);
    }

    /// Change the state and write it under one lock, so no write can land
    /// after the final zero of a concurrent stop.
    fn update(&self, change: impl FnOnce(&mut RumbleState)) {
        let mut state = self.inner.lock();
        change(&mut state);
        self.inner.write_if_active(&state);
    }

    /// Start the output loop. Does nothing if already active.
    pub async fn start(&self) {
        let mut driver = self.inner.driver.lock().await;
        self.start_locked(&mut driver);
    }

    /// Stop the output loop, wait for it to exit, then write `(0, 0)`.
    /// Does nothing if already inactive.
    pub async fn stop(&self) {
        let mut driver = self.inner.driver.lock().await;
        self.stop_locked(&mut driver).await;
    }

    /// Flip between active and inactive. Returns the new activation.
    pub async fn toggle(&self) -> bool {
        let mut driver = self.inner.driver.lock().await;
        if self.is_active() {
            self.stop_locked(&mut driver).await;
            false
        } else {
            self.start_locked(&mut driver);
            true
        }
    }

    fn start_locked(&self, driver: &mut Option<JoinHandle<()>>) {
        {
            let mut state = self.inner.lock();
            if state.active {
                return;
            }
            state.active = true;
        }

        info!("Vibration started");
        *driver = Some(tokio::spawn(drive(Arc::clone(&self.inner))));
    }

    async fn stop_locked(&self, driver: &mut Option<JoinHandle<()>>) {
        {
            let mut state = self.inner.lock();
            if !state.active {
                return;
            }
            state.active = false;
        }

        if let Some(handle) = driver.take() {
            if let Err(e) = handle.await {
                warn!("Vibration driver ended abnormally: {}", e);
            }
        }

        {
            // Edits that take the lock after this point see `active == false`
            let _state = self.inner.lock();
            self.inner.write(0, 0);
        }
        info!("Vibration stopped");
    }
}

/// Output loop: one write per tick until the session is deactivated.
async fn drive(inner: Arc<Inner>) {
    let mut ticker = interval(inner.drive_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let state = inner.lock();
        if !state.active {
            break;
        }
        inner.write_if_active(&state);
    }

    debug!("Vibration driver exited");
}
