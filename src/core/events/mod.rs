//=========================================================================
// Event Model
//
// Typed window and input events, their category mask, and the per-window
// dispatch table that routes them to application callbacks.
//
// Event Flow:
// ```text
// Native backend (winit)
//         ↓  translate
//     AnyEvent (tagged union of the typed events below)
//         ↓  EventHandler::dispatch
//     one callback slot per EventType
// ```
//
// Design:
// - Every concrete event is a small value type. Type tag and category
//   mask are fixed per type; only the `handled` flag is mutable.
// - Events are built at the moment a native notification is observed,
//   passed by `&mut` through exactly one dispatch, then dropped.
//
//=========================================================================

//=== External Crates =====================================================

use bitflags::bitflags;

//=== EventType ===========================================================

/// Static type tag of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    WindowClose,
    WindowResize,
    WindowFocus,
    WindowLostFocus,
    WindowMoved,
    KeyPressed,
    KeyReleased,
    MouseButtonPressed,
    MouseButtonReleased,
    MouseMoved,
    MouseScrolled,
}

//=== EventCategory =======================================================

bitflags! {
    /// Coarse grouping of event types, combinable as a bitmask.
    ///
    /// ```text
    /// Window events        → WINDOW
    /// Key events           → KEYBOARD | INPUT
    /// Mouse move / scroll  → MOUSE | INPUT
    /// Mouse button events  → MOUSE | MOUSE_BUTTON | INPUT
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventCategory: u32 {
        const WINDOW = 1 << 0;
        const INPUT = 1 << 1;
        const KEYBOARD = 1 << 2;
        const MOUSE = 1 << 3;
        const MOUSE_BUTTON = 1 << 4;
    }
}

//=== Event Trait =========================================================

/// Common interface of every typed event.
pub trait Event {
    /// Returns the static type tag of this event.
    fn event_type(&self) -> EventType;

    /// Returns the category mask fixed for this event type.
    fn category_flags(&self) -> EventCategory;

    /// Returns whether a handler marked this event as handled.
    fn handled(&self) -> bool;

    /// Marks (or unmarks) the event as handled.
    ///
    /// The flag is informational only: nothing in the engine stops
    /// propagation based on it.
    fn set_handled(&mut self, handled: bool);

    /// Returns `true` iff `category_flags() & category != 0`.
    fn is_in_category(&self, category: EventCategory) -> bool {
        self.category_flags().intersects(category)
    }
}

//--- Implementation Helper -----------------------------------------------
//
// Wires a concrete event struct (which must own a `handled: bool` field)
// to its static type tag and category mask.
//
macro_rules! impl_event {
    ($event:ident, $kind:ident, $category:expr) => {
        impl $event {
            /// Static type tag shared by every instance of this event.
            pub const EVENT_TYPE: $crate::core::events::EventType =
                $crate::core::events::EventType::$kind;
        }

        impl $crate::core::events::Event for $event {
            fn event_type(&self) -> $crate::core::events::EventType {
                Self::EVENT_TYPE
            }

            fn category_flags(&self) -> $crate::core::events::EventCategory {
                $category
            }

            fn handled(&self) -> bool {
                self.handled
            }

            fn set_handled(&mut self, handled: bool) {
                self.handled = handled;
            }
        }

        impl From<$event> for $crate::core::events::AnyEvent {
            fn from(event: $event) -> Self {
                $crate::core::events::AnyEvent::$kind(event)
            }
        }
    };
}

//=== Submodules ==========================================================

mod codes;
mod event_handler;
mod keyboard_events;
mod mouse_events;
mod window_events;

//=== Public API ==========================================================

pub use codes::{KeyCode, MouseButton};
pub use event_handler::{EventCallback, EventHandler};
pub use keyboard_events::{KeyPressedEvent, KeyReleasedEvent};
pub use mouse_events::{
    MouseButtonPressedEvent, MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent,
};
pub use window_events::{
    WindowCloseEvent, WindowFocusEvent, WindowLostFocusEvent, WindowMovedEvent,
    WindowResizeEvent,
};

//=== AnyEvent ============================================================

/// Tagged union of every typed event.
///
/// This is what a platform backend produces when it translates a native
/// notification; [`EventHandler::dispatch`] unpacks it into the matching
/// typed callback slot. Variant names equal the [`EventType`] names.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEvent {
    WindowClose(WindowCloseEvent),
    WindowResize(WindowResizeEvent),
    WindowFocus(WindowFocusEvent),
    WindowLostFocus(WindowLostFocusEvent),
    WindowMoved(WindowMovedEvent),
    KeyPressed(KeyPressedEvent),
    KeyReleased(KeyReleasedEvent),
    MouseButtonPressed(MouseButtonPressedEvent),
    MouseButtonReleased(MouseButtonReleasedEvent),
    MouseMoved(MouseMovedEvent),
    MouseScrolled(MouseScrolledEvent),
}

impl AnyEvent {
    /// Borrows the wrapped event through the common trait.
    pub fn as_event(&self) -> &dyn Event {
        match self {
            Self::WindowClose(e) => e,
            Self::WindowResize(e) => e,
            Self::WindowFocus(e) => e,
            Self::WindowLostFocus(e) => e,
            Self::WindowMoved(e) => e,
            Self::KeyPressed(e) => e,
            Self::KeyReleased(e) => e,
            Self::MouseButtonPressed(e) => e,
            Self::MouseButtonReleased(e) => e,
            Self::MouseMoved(e) => e,
            Self::MouseScrolled(e) => e,
        }
    }

    /// Mutably borrows the wrapped event through the common trait.
    pub fn as_event_mut(&mut self) -> &mut dyn Event {
        match self {
            Self::WindowClose(e) => e,
            Self::WindowResize(e) => e,
            Self::WindowFocus(e) => e,
            Self::WindowLostFocus(e) => e,
            Self::WindowMoved(e) => e,
            Self::KeyPressed(e) => e,
            Self::KeyReleased(e) => e,
            Self::MouseButtonPressed(e) => e,
            Self::MouseButtonReleased(e) => e,
            Self::MouseMoved(e) => e,
            Self::MouseScrolled(e) => e,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.as_event().event_type()
    }

    pub fn category_flags(&self) -> EventCategory {
        self.as_event().category_flags()
    }

    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.as_event().is_in_category(category)
    }

    pub fn handled(&self) -> bool {
        self.as_event().handled()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
