//! Jump input sampling
//!
//! Keyboard, touch and pointer sources all funnel into the same two calls.

use crate::consts::JUMP_BUFFER_FRAMES;

/// Jump button state plus a short grace buffer for early presses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpInput {
    /// Button currently down
    pub held: bool,
    /// Frames left in which a press still counts
    pub buffer: u32,
}

impl JumpInput {
    pub fn on_jump_pressed(&mut self) {
        self.held = true;
        self.buffer = JUMP_BUFFER_FRAMES;
    }

    pub fn on_jump_released(&mut self) {
        self.held = false;
    }

    /// Whether a grounded runner should take off this frame
    pub fn wants_jump(&self) -> bool {
        self.buffer > 0 || self.held
    }

    /// Drop the buffered press once it has been spent on a jump
    pub fn consume(&mut self) {
        self.buffer = 0;
    }

    /// Age the buffer by one frame
    pub fn decay(&mut self) {
        self.buffer = self.buffer.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_fills_buffer() {
        let mut input = JumpInput::default();
        assert!(!input.wants_jump());

        input.on_jump_pressed();
        assert!(input.held);
        assert_eq!(input.buffer, JUMP_BUFFER_FRAMES);

        input.on_jump_released();
        assert!(!input.held);
        assert!(input.wants_jump(), "buffer outlives the release");
    }

    #[test]
    fn test_buffer_expires() {
        let mut input = JumpInput::default();
        input.on_jump_pressed();
        input.on_jump_released();
        for _ in 0..JUMP_BUFFER_FRAMES {
            input.decay();
        }
        assert!(!input.wants_jump());
        input.decay();
        assert_eq!(input.buffer, 0);
    }

    #[test]
    fn test_consume_keeps_hold() {
        let mut input = JumpInput::default();
        input.on_jump_pressed();
        input.consume();
        assert_eq!(input.buffer, 0);
        assert!(input.wants_jump(), "still held");
    }
}
