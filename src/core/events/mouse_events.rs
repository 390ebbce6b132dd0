//=========================================================================
// Mouse Events
//
// Cursor movement and wheel scrolling carry MOUSE | INPUT; button
// transitions additionally carry MOUSE_BUTTON.
//
//=========================================================================

use glam::Vec2;

use crate::core::events::{EventCategory, MouseButton};

const MOUSE_CATEGORY: EventCategory = EventCategory::MOUSE.union(EventCategory::INPUT);
const MOUSE_BUTTON_CATEGORY: EventCategory = MOUSE_CATEGORY.union(EventCategory::MOUSE_BUTTON);

//=== MouseMovedEvent =====================================================

/// The cursor moved; coordinates are window-relative, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseMovedEvent {
    x: f32,
    y: f32,
    handled: bool,
}

impl MouseMovedEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, handled: false }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl_event!(MouseMovedEvent, MouseMoved, MOUSE_CATEGORY);

//=== MouseScrolledEvent ==================================================

/// The wheel (or trackpad) scrolled by the given offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseScrolledEvent {
    x_offset: f32,
    y_offset: f32,
    handled: bool,
}

impl MouseScrolledEvent {
    pub fn new(x_offset: f32, y_offset: f32) -> Self {
        Self {
            x_offset,
            y_offset,
            handled: false,
        }
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }
}

impl_event!(MouseScrolledEvent, MouseScrolled, MOUSE_CATEGORY);

//=== MouseButtonPressedEvent =============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseButtonPressedEvent {
    button: MouseButton,
    handled: bool,
}

impl MouseButtonPressedEvent {
    pub fn new(button: MouseButton) -> Self {
        Self {
            button,
            handled: false,
        }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }
}

impl_event!(MouseButtonPressedEvent, MouseButtonPressed, MOUSE_BUTTON_CATEGORY);

//=== MouseButtonReleasedEvent ============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseButtonReleasedEvent {
    button: MouseButton,
    handled: bool,
}

impl MouseButtonReleasedEvent {
    pub fn new(button: MouseButton) -> Self {
        Self {
            button,
            handled: false,
        }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }
}

impl_event!(MouseButtonReleasedEvent, MouseButtonReleased, MOUSE_BUTTON_CATEGORY);

//=========================================================================
// Unit Tests
//=========================================================================
