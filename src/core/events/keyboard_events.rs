//=========================================================================
// Keyboard Events
//=========================================================================

use crate::core::events::{EventCategory, KeyCode};

const KEYBOARD_CATEGORY: EventCategory = EventCategory::KEYBOARD.union(EventCategory::INPUT);

//=== KeyPressedEvent =====================================================

/// A key went down, or is auto-repeating while held.
///
/// `repeat_count` is `0` for the initial press and `1` for every
/// auto-repeat notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressedEvent {
    key_code: KeyCode,
    repeat_count: u32,
    handled: bool,
}

impl KeyPressedEvent {
    pub fn new(key_code: KeyCode, repeat_count: u32) -> Self {
        Self {
            key_code,
            repeat_count,
            handled: false,
        }
    }

    pub fn key_code(&self) -> KeyCode {
        self.key_code
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat_count > 0
    }
}

impl_event!(KeyPressedEvent, KeyPressed, KEYBOARD_CATEGORY);

//=== KeyReleasedEvent ====================================================

/// A key went up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReleasedEvent {
    key_code: KeyCode,
    handled: bool,
}

impl KeyReleasedEvent {
    pub fn new(key_code: KeyCode) -> Self {
        Self {
            key_code,
            handled: false,
        }
    }

    pub fn key_code(&self) -> KeyCode {
        self.key_code
    }
}

impl_event!(KeyReleasedEvent, KeyReleased, KEYBOARD_CATEGORY);

//=========================================================================
// Unit Tests
//=========================================================================
