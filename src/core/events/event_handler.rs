//=========================================================================
// Event Handler
//
// Per-window dispatch table: exactly one callback slot per event type.
//
// Responsibilities:
// - Hold one replaceable callback per EventType (default: returns false)
// - Route an AnyEvent to the slot matching its type
//
// Callbacks receive the typed event by `&mut` and may set its `handled`
// flag. The returned bool is surfaced to the caller of `dispatch` and is
// otherwise unused: dispatch never stops, chains or re-routes.
//
//=========================================================================

use crate::core::events::{
    AnyEvent, KeyPressedEvent, KeyReleasedEvent, MouseButtonPressedEvent,
    MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent, WindowCloseEvent,
    WindowFocusEvent, WindowLostFocusEvent, WindowMovedEvent, WindowResizeEvent,
};

/// Boxed callback for a single event type.
pub type EventCallback<E> = Box<dyn FnMut(&mut E) -> bool>;

fn noop<E>() -> EventCallback<E> {
    Box::new(|_| false)
}

//--- Slot Table ----------------------------------------------------------
//
// Generates the handler struct, its defaults, one setter/getter pair per
// slot, and the dispatch match.
//
macro_rules! event_handler {
    ($( $variant:ident : $event:ty => $field:ident, $setter:ident; )*) => {
        /// One callback slot per event type.
        ///
        /// Owned by a window; the application installs callbacks after
        /// the window is created and before the frame loop starts.
        pub struct EventHandler {
            $( $field: EventCallback<$event>, )*
        }

        impl Default for EventHandler {
            fn default() -> Self {
                Self {
                    $( $field: noop(), )*
                }
            }
        }

        impl EventHandler {
            $(
                /// Replaces this slot's callback; the previous one is dropped.
                pub fn $setter(&mut self, callback: impl FnMut(&mut $event) -> bool + 'static) {
                    self.$field = Box::new(callback);
                }

                /// Mutable access to this slot's current callback.
                pub fn $field(&mut self) -> &mut EventCallback<$event> {
                    &mut self.$field
                }
            )*

            /// Invokes the callback registered for the event's type.
            ///
            /// Returns whatever that callback returned.
            pub fn dispatch(&mut self, event: &mut AnyEvent) -> bool {
                match event {
                    $( AnyEvent::$variant(e) => (self.$field)(e), )*
                }
            }
        }
    };
}

event_handler! {
    WindowClose: WindowCloseEvent => on_window_close_callback, set_on_window_close_callback;
    WindowResize: WindowResizeEvent => on_window_resize_callback, set_on_window_resize_callback;
    WindowFocus: WindowFocusEvent => on_window_focus_callback, set_on_window_focus_callback;
    WindowLostFocus: WindowLostFocusEvent => on_window_lost_focus_callback, set_on_window_lost_focus_callback;
    WindowMoved: WindowMovedEvent => on_window_moved_callback, set_on_window_moved_callback;
    KeyPressed: KeyPressedEvent => on_key_pressed_callback, set_on_key_pressed_callback;
    KeyReleased: KeyReleasedEvent => on_key_released_callback, set_on_key_released_callback;
    MouseButtonPressed: MouseButtonPressedEvent => on_mouse_button_pressed_callback, set_on_mouse_button_pressed_callback;
    MouseButtonReleased: MouseButtonReleasedEvent => on_mouse_button_released_callback, set_on_mouse_button_released_callback;
    MouseMoved: MouseMovedEvent => on_mouse_moved_callback, set_on_mouse_moved_callback;
    MouseScrolled: MouseScrolledEvent => on_mouse_scrolled_callback, set_on_mouse_scrolled_callback;
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandler").finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{Event, KeyCode, MouseButton};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    //=====================================================================
    // Default Slot Tests
    //=====================================================================

    #[test]
    fn default_close_callback_returns_false_and_leaves_event_unhandled() {
        let mut handler = EventHandler::new();
        let mut event = WindowCloseEvent::new();

        let result = (handler.on_window_close_callback())(&mut event);

        assert!(!result);
        assert!(!event.handled());
    }

    #[test]
    fn every_default_slot_returns_false() {
        let mut handler = EventHandler::new();
        let mut events: Vec<AnyEvent> = vec![
            WindowCloseEvent::new().into(),
            WindowResizeEvent::new(1, 1).into(),
            WindowFocusEvent::new().into(),
            WindowLostFocusEvent::new().into(),
            WindowMovedEvent::new(0, 0).into(),
            KeyPressedEvent::new(KeyCode::KeyA, 0).into(),
            KeyReleasedEvent::new(KeyCode::KeyA).into(),
            MouseButtonPressedEvent::new(MouseButton::Left).into(),
            MouseButtonReleasedEvent::new(MouseButton::Left).into(),
            MouseMovedEvent::new(0.0, 0.0).into(),
            MouseScrolledEvent::new(0.0, 0.0).into(),
        ];

        for event in &mut events {
            assert!(!handler.dispatch(event));
            assert!(!event.handled());
        }
    }

    //=====================================================================
    // Replacement Tests
    //=====================================================================

    #[test]
    fn custom_close_callback_marks_event_handled() {
        let mut handler = EventHandler::new();
        handler.set_on_window_close_callback(|e| {
            e.set_handled(true);
            true
        });

        let mut event = WindowCloseEvent::new();
        let result = (handler.on_window_close_callback())(&mut event);

        assert!(result);
        assert!(event.handled());
    }

    #[test]
    fn replacing_one_slot_leaves_the_others_default() {
        let mut handler = EventHandler::new();
        handler.set_on_key_pressed_callback(|_| true);

        let mut pressed: AnyEvent = KeyPressedEvent::new(KeyCode::KeyW, 0).into();
        let mut released: AnyEvent = KeyReleasedEvent::new(KeyCode::KeyW).into();

        assert!(handler.dispatch(&mut pressed));
        assert!(!handler.dispatch(&mut released));
    }

    #[test]
    fn second_registration_replaces_the_first() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut handler = EventHandler::new();

        let log = calls.clone();
        handler.set_on_window_focus_callback(move |_| {
            log.borrow_mut().push("first");
            false
        });
        let log = calls.clone();
        handler.set_on_window_focus_callback(move |_| {
            log.borrow_mut().push("second");
            false
        });

        handler.dispatch(&mut WindowFocusEvent::new().into());

        assert_eq!(*calls.borrow(), vec!["second"]);
    }

    //=====================================================================
    // Dispatch Tests
    //=====================================================================

    #[test]
    fn dispatch_routes_payload_to_typed_slot() {
        let seen = Rc::new(Cell::new((0, 0)));
        let mut handler = EventHandler::new();

        let sink = seen.clone();
        handler.set_on_window_resize_callback(move |e| {
            sink.set(e.size());
            true
        });

        let mut event: AnyEvent = WindowResizeEvent::new(1024, 800).into();
        assert!(handler.dispatch(&mut event));
        assert_eq!(seen.get(), (1024, 800));
    }

    #[test]
    fn dispatch_does_not_stop_on_handled_flag() {
        let count = Rc::new(Cell::new(0));
        let mut handler = EventHandler::new();

        let c = count.clone();
        handler.set_on_mouse_moved_callback(move |e| {
            c.set(c.get() + 1);
            e.set_handled(true);
            true
        });

        let mut event: AnyEvent = MouseMovedEvent::new(1.0, 1.0).into();
        handler.dispatch(&mut event);
        handler.dispatch(&mut event);

        assert_eq!(count.get(), 2);
        assert!(event.handled());
    }
}
