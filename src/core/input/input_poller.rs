//=========================================================================
// Input Poller
//
// Explicit polling context: answers "is this key held right now?" for
// whichever window is currently selected.
//
// Only one window is current at a time; selecting another replaces the
// previous selection (last writer wins). With no current window every
// query returns its sentinel instead of failing.
//
//=========================================================================

use glam::Vec2;
use log::trace;

use crate::core::events::{KeyCode, MouseButton};
use crate::core::input::InputSource;

/// Cursor position reported when no position is known.
pub const NO_MOUSE_POSITION: Vec2 = Vec2::new(-1.0, -1.0);

//=== InputPoller =========================================================

#[derive(Debug, Default)]
pub struct InputPoller {
    current: Option<InputSource>,
}

impl InputPoller {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Current Window ---------------------------------------------------

    /// Makes `source` the window all subsequent queries read from.
    pub fn set_current_window(&mut self, source: InputSource) {
        trace!(target: "platform::input", "Input poller switched window");
        self.current = Some(source);
    }

    pub fn clear_current_window(&mut self) {
        self.current = None;
    }

    pub fn has_current_window(&self) -> bool {
        self.current.is_some()
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while `key` is held in the current window.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.current
            .as_ref()
            .is_some_and(|source| source.borrow().is_key_down(key))
    }

    /// Returns `true` while `button` is held in the current window.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.current
            .as_ref()
            .is_some_and(|source| source.borrow().is_button_down(button))
    }

    /// Cursor position in window coordinates, or [`NO_MOUSE_POSITION`].
    pub fn mouse_position(&self) -> Vec2 {
        self.current
            .as_ref()
            .and_then(|source| source.borrow().cursor_position())
            .unwrap_or(NO_MOUSE_POSITION)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
