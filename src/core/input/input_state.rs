//=========================================================================
// Input State
//
// Live per-window snapshot of held keys, held mouse buttons and the last
// cursor sample.
//
// Responsibilities:
// - Digest typed events into persistent held/released state
// - Release everything when the window loses focus
// - Answer point queries for the input poller
//
// Notes:
// The platform backend feeds every translated event through `apply()`
// *before* dispatching it, so a callback that polls sees the state the
// event describes.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

//=== External Crates =====================================================

use glam::Vec2;

//=== Internal Modules ====================================================

use crate::core::events::{AnyEvent, KeyCode, MouseButton};

//=== InputSource =========================================================

/// Shared handle to one window's live input state.
///
/// The window owns one; the [`InputPoller`](super::InputPoller) borrows a
/// clone while that window is current.
pub type InputSource = Rc<RefCell<InputState>>;

//=== DiscreteInput =======================================================
//
// Binary input elements. Presence in the set means "held".
//
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DiscreteInput {
    Key(KeyCode),
    Button(MouseButton),
}

//=== InputState ==========================================================

#[derive(Default)]
pub struct InputState {
    discrete: HashSet<DiscreteInput>,
    cursor: Option<Vec2>,
}

impl InputState {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 32;
        Self {
            discrete: HashSet::with_capacity(DISCRETE_BASE),
            cursor: None,
        }
    }

    /// Creates an empty state already wrapped in a shareable handle.
    pub fn shared() -> InputSource {
        Rc::new(RefCell::new(Self::new()))
    }

    //--- apply() ----------------------------------------------------------
    //
    // Updates held state from one translated event. Returns `true` if the
    // snapshot changed. Window events other than focus loss are ignored.
    //
    pub fn apply(&mut self, event: &AnyEvent) -> bool {
        match event {
            AnyEvent::KeyPressed(e) => self.discrete.insert(DiscreteInput::Key(e.key_code())),
            AnyEvent::KeyReleased(e) => self.discrete.remove(&DiscreteInput::Key(e.key_code())),
            AnyEvent::MouseButtonPressed(e) => {
                self.discrete.insert(DiscreteInput::Button(e.button()))
            }
            AnyEvent::MouseButtonReleased(e) => {
                self.discrete.remove(&DiscreteInput::Button(e.button()))
            }
            AnyEvent::MouseMoved(e) => {
                let position = e.position();
                let changed = self.cursor != Some(position);
                self.cursor = Some(position);
                changed
            }
            AnyEvent::WindowLostFocus(_) => self.release_all(),
            _ => false,
        }
    }

    //--- release_all() ----------------------------------------------------
    //
    // Drops every held key and button. The cursor sample is kept.
    //
    pub fn release_all(&mut self) -> bool {
        let changed = !self.discrete.is_empty();
        self.discrete.clear();
        changed
    }

    //=====================================================================
    // Queries
    //=====================================================================

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.discrete.contains(&DiscreteInput::Key(key))
    }

    /// Returns `true` while `button` is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.discrete.contains(&DiscreteInput::Button(button))
    }

    /// Last cursor sample, or `None` if the cursor never entered the window.
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }
}

//=== Debug Trait =========================================================
//
// ```text
// InputState { cursor: Some(Vec2(420.0, 255.0)), held: ["Key(KeyW)", "Button(Right)"] }
// ```
//
impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let held: Vec<_> = self.discrete.iter().map(|k| format!("{:?}", k)).collect();

        f.debug_struct("InputState")
            .field("cursor", &self.cursor)
            .field("held", &held)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
