//! Rising-edge detection for held buttons and triggers.

/// Remembers whether an input was down on the previous poll.
///
/// # Examples
///
/// ```
/// use pad_rumble::input::latch::EdgeLatch;
///
/// let mut latch = EdgeLatch::default();
/// assert!(latch.update(true));   // pressed
/// assert!(!latch.update(true));  // still held
/// assert!(!latch.update(false)); // released
/// assert!(latch.update(true));   // pressed again
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLatch {
    pressed: bool,
}

impl EdgeLatch {
    /// Feed the current pressed condition. Returns true only on a
    /// released-to-pressed transition.
    pub fn update(&mut self, pressed_now: bool) -> bool {
        let rising = pressed_now && !self.pressed;
        self.pressed = pressed_now;
        rising
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_fires_once() {
        let mut latch = EdgeLatch::default();
        let fired = (0..10).filter(|_| latch.update(true)).count();
        assert_eq!(fired, 1, "Holding should fire exactly once");
        assert!(latch.is_pressed());
    }

    #[test]
    fn test_release_rearms() {
        let mut latch = EdgeLatch::default();
        let pattern = [true, true, false, true, false, false, true];
        let fired: Vec<bool> = pattern.iter().map(|&p| latch.update(p)).collect();
        assert_eq!(fired, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn test_idle_never_fires() {
        let mut latch = EdgeLatch::default();
        assert!(!latch.update(false));
        assert!(!latch.is_pressed());
    }
}
