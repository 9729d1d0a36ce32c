//! # Motor Model
//!
//! Per-motor enable flag and normalized intensity, plus the conversions to
//! the native 16-bit motor speed and to the percentage shown in the window.

/// Highest native motor speed
pub const MOTOR_SPEED_MAX: u16 = u16::MAX;

/// One of the two vibration motors.
///
/// The left motor is the heavy low-frequency one, the right motor the light
/// high-frequency one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motor {
    Left,
    Right,
}

impl Motor {
    /// Both motors in display order
    pub const ALL: [Motor; 2] = [Motor::Left, Motor::Right];

    /// Label used for the motor's panel in the window.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Motor::Left => "Left Motor",
            Motor::Right => "Right Motor",
        }
    }
}

/// Enable flag and intensity of one motor.
///
/// # Examples
///
/// ```
/// use pad_rumble::vibration::motor::MotorState;
///
/// let mut motor = MotorState::default();
/// assert!(motor.enabled);
/// assert_eq!(motor.intensity, 0.0);
///
/// motor.intensity = 0.5;
/// motor.enabled = false;
/// assert_eq!(motor.effective(), 0.0);
/// assert_eq!(motor.intensity, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorState {
    /// Whether the motor is driven at all.
    pub enabled: bool,
    /// Requested strength in `[0.0, 1.0]`.
    pub intensity: f32,
}

impl Default for MotorState {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.0,
        }
    }
}

impl MotorState {
    /// Intensity actually sent to the device: zero while disabled.
    #[must_use]
    pub fn effective(&self) -> f32 {
        if self.enabled {
            self.intensity
        } else {
            0.0
        }
    }

    /// Native speed for the device, see [`to_motor_speed`].
    #[must_use]
    pub fn motor_speed(&self) -> u16 {
        to_motor_speed(self.effective())
    }

    /// Set the intensity, clamped to `[0.0, 1.0]`.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = clamp_intensity(intensity);
    }

    /// Move the intensity by `delta`, clamped to `[0.0, 1.0]`.
    pub fn nudge(&mut self, delta: f32) {
        self.set_intensity(self.intensity + delta);
    }
}

/// Clamp an intensity into `[0.0, 1.0]`. NaN becomes 0.
#[must_use]
pub fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

/// Convert a normalized intensity to the device's 16-bit motor speed.
///
/// # Examples
///
/// ```
/// use pad_rumble::vibration::motor::to_motor_speed;
///
/// assert_eq!(to_motor_speed(0.0), 0);
/// assert_eq!(to_motor_speed(0.5), 32768);
/// assert_eq!(to_motor_speed(1.0), 65535);
/// ```
#[must_use]
pub fn to_motor_speed(intensity: f32) -> u16 {
    (clamp_intensity(intensity) * f32::from(MOTOR_SPEED_MAX)).round() as u16
}

/// Percentage label for an intensity, e.g. `"42%"`.
#[must_use]
pub fn percent_label(intensity: f32) -> String {
    format!("{}%", (clamp_intensity(intensity) * 100.0).round() as u32)
}
