//=========================================================================
// Window Events
//
// Close, resize, focus and move notifications. All carry the WINDOW
// category only.
//
//=========================================================================

use crate::core::events::EventCategory;

//=== WindowCloseEvent ====================================================

/// The user or OS asked the window to close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowCloseEvent {
    handled: bool,
}

impl WindowCloseEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_event!(WindowCloseEvent, WindowClose, EventCategory::WINDOW);

//=== WindowResizeEvent ===================================================

/// The window's client area changed size (physical pixels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowResizeEvent {
    width: i32,
    height: i32,
    handled: bool,
}

impl WindowResizeEvent {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            handled: false,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl_event!(WindowResizeEvent, WindowResize, EventCategory::WINDOW);

//=== WindowFocusEvent ====================================================

/// The window gained keyboard focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowFocusEvent {
    handled: bool,
}

impl WindowFocusEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_event!(WindowFocusEvent, WindowFocus, EventCategory::WINDOW);

//=== WindowLostFocusEvent ================================================

/// The window lost keyboard focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowLostFocusEvent {
    handled: bool,
}

impl WindowLostFocusEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_event!(WindowLostFocusEvent, WindowLostFocus, EventCategory::WINDOW);

//=== WindowMovedEvent ====================================================

/// The window's top-left corner moved to a new desktop position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowMovedEvent {
    x: i32,
    y: i32,
    handled: bool,
}

impl WindowMovedEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, handled: false }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns `(x, y)`.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl_event!(WindowMovedEvent, WindowMoved, EventCategory::WINDOW);

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{Event, EventType};

    #[test]
    fn resize_exposes_dimensions() {
        let e = WindowResizeEvent::new(1024, 800);

        assert_eq!(e.width(), 1024);
        assert_eq!(e.height(), 800);
        assert_eq!(e.size(), (1024, 800));
        assert_eq!(e.category_flags(), EventCategory::WINDOW);
        assert!(e.is_in_category(EventCategory::WINDOW));
        assert_eq!(e.event_type(), WindowResizeEvent::EVENT_TYPE);
        assert_eq!(e.event_type(), EventType::WindowResize);
    }

    #[test]
    fn resize_is_not_an_input_event() {
        let e = WindowResizeEvent::new(800, 600);
        assert!(!e.is_in_category(EventCategory::INPUT));
        assert!(!e.is_in_category(EventCategory::MOUSE | EventCategory::KEYBOARD));
    }

    #[test]
    fn moved_exposes_position() {
        let e = WindowMovedEvent::new(-15, 40);
        assert_eq!(e.position(), (-15, 40));
        assert_eq!(e.event_type(), EventType::WindowMoved);
    }

    #[test]
    fn close_handled_round_trip() {
        let mut e = WindowCloseEvent::new();
        assert!(!e.handled());
        e.set_handled(true);
        assert!(e.handled());
        e.set_handled(false);
        assert!(!e.handled());
    }
}
