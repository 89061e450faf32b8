//! Raw input → jump button edges

/// Press or release of the single jump button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpSignal {
    Pressed,
    Released,
}

/// Keys that act as the jump button
const JUMP_KEYS: [&str; 2] = ["Space", "ArrowUp"];

/// Map a keyboard event's `code` to a jump edge.
///
/// `down` is true for keydown. Auto-repeated keydowns map to nothing; the key
/// is still held, which keeps the runner jumping.
pub fn key_signal(code: &str, down: bool, repeat: bool) -> Option<JumpSignal> {
    if !JUMP_KEYS.contains(&code) {
        return None;
    }
    match (down, repeat) {
        (true, false) => Some(JumpSignal::Pressed),
        (true, true) => None,
        (false, _) => Some(JumpSignal::Released),
    }
}

/// Touch and mouse buttons: start/down presses, end/up releases
pub fn pointer_signal(down: bool) -> JumpSignal {
    if down {
        JumpSignal::Pressed
    } else {
        JumpSignal::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys() {
        assert_eq!(key_signal("Space", true, false), Some(JumpSignal::Pressed));
        assert_eq!(key_signal("ArrowUp", false, false), Some(JumpSignal::Released));
        assert_eq!(key_signal("KeyW", true, false), None);
    }

    #[test]
    fn test_repeat_ignored() {
        assert_eq!(key_signal("Space", true, true), None);
        assert_eq!(key_signal("Space", false, true), Some(JumpSignal::Released));
    }

    #[test]
    fn test_pointer() {
        assert_eq!(pointer_signal(true), JumpSignal::Pressed);
        assert_eq!(pointer_signal(false), JumpSignal::Released);
    }
}
