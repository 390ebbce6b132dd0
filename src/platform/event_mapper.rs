//=========================================================================
// Platform Event Mapper
//
// Converts winit window events into the engine's typed events.
//
// Responsibilities:
// - Translate physical keys and mouse buttons into portable codes
// - Map the window notifications the engine exposes onto `AnyEvent`
// - Ignore everything else (redraw requests, IME, touch, ...)
//
//=========================================================================

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::core::events::{
    AnyEvent, KeyCode, KeyPressedEvent, KeyReleasedEvent, MouseButton, MouseButtonPressedEvent,
    MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent, WindowCloseEvent,
    WindowFocusEvent, WindowLostFocusEvent, WindowMovedEvent, WindowResizeEvent,
};

/// Pixels per scroll line when the backend reports pixel deltas.
const PIXELS_PER_LINE: f32 = 20.0;

//=== Key Conversion ======================================================
//
// Only a subset of winit codes has an engine counterpart; the rest map
// to `Unidentified`.
//

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            //--- Numeric keys ---------------------------------------------
            W::Digit0 => KeyCode::Digit0, W::Digit1 => KeyCode::Digit1,
            W::Digit2 => KeyCode::Digit2, W::Digit3 => KeyCode::Digit3,
            W::Digit4 => KeyCode::Digit4, W::Digit5 => KeyCode::Digit5,
            W::Digit6 => KeyCode::Digit6, W::Digit7 => KeyCode::Digit7,
            W::Digit8 => KeyCode::Digit8, W::Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys ------------------------------------------
            W::KeyA => KeyCode::KeyA, W::KeyB => KeyCode::KeyB, W::KeyC => KeyCode::KeyC,
            W::KeyD => KeyCode::KeyD, W::KeyE => KeyCode::KeyE, W::KeyF => KeyCode::KeyF,
            W::KeyG => KeyCode::KeyG, W::KeyH => KeyCode::KeyH, W::KeyI => KeyCode::KeyI,
            W::KeyJ => KeyCode::KeyJ, W::KeyK => KeyCode::KeyK, W::KeyL => KeyCode::KeyL,
            W::KeyM => KeyCode::KeyM, W::KeyN => KeyCode::KeyN, W::KeyO => KeyCode::KeyO,
            W::KeyP => KeyCode::KeyP, W::KeyQ => KeyCode::KeyQ, W::KeyR => KeyCode::KeyR,
            W::KeyS => KeyCode::KeyS, W::KeyT => KeyCode::KeyT, W::KeyU => KeyCode::KeyU,
            W::KeyV => KeyCode::KeyV, W::KeyW => KeyCode::KeyW, W::KeyX => KeyCode::KeyX,
            W::KeyY => KeyCode::KeyY, W::KeyZ => KeyCode::KeyZ,

            //--- Arrow keys -----------------------------------------------
            W::ArrowDown => KeyCode::ArrowDown, W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight, W::ArrowUp => KeyCode::ArrowUp,

            //--- Function keys --------------------------------------------
            W::F1 => KeyCode::F1, W::F2 => KeyCode::F2, W::F3 => KeyCode::F3,
            W::F4 => KeyCode::F4, W::F5 => KeyCode::F5, W::F6 => KeyCode::F6,
            W::F7 => KeyCode::F7, W::F8 => KeyCode::F8, W::F9 => KeyCode::F9,
            W::F10 => KeyCode::F10, W::F11 => KeyCode::F11, W::F12 => KeyCode::F12,

            //--- Modifiers ------------------------------------------------
            W::ShiftLeft => KeyCode::ShiftLeft, W::ShiftRight => KeyCode::ShiftRight,
            W::ControlLeft => KeyCode::ControlLeft, W::ControlRight => KeyCode::ControlRight,
            W::AltLeft => KeyCode::AltLeft, W::AltRight => KeyCode::AltRight,

            //--- Special keys ---------------------------------------------
            W::Space => KeyCode::Space,
            W::Enter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            W::Backspace => KeyCode::Backspace,
            W::Delete => KeyCode::Delete,

            //--- Fallback -------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

impl From<PhysicalKey> for KeyCode {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => code.into(),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(index) => MouseButton::Other(index),
        }
    }
}

//=== Event Construction ==================================================

/// Key press or release. Auto-repeat presses carry a repeat count of 1.
pub(crate) fn key_event(key: KeyCode, state: ElementState, repeat: bool) -> AnyEvent {
    match state {
        ElementState::Pressed => KeyPressedEvent::new(key, u32::from(repeat)).into(),
        ElementState::Released => KeyReleasedEvent::new(key).into(),
    }
}

pub(crate) fn mouse_button_event(button: MouseButton, state: ElementState) -> AnyEvent {
    match state {
        ElementState::Pressed => MouseButtonPressedEvent::new(button).into(),
        ElementState::Released => MouseButtonReleasedEvent::new(button).into(),
    }
}

/// Scroll offsets in lines.
fn scroll_offsets(delta: MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(pos) => (
            pos.x as f32 / PIXELS_PER_LINE,
            pos.y as f32 / PIXELS_PER_LINE,
        ),
    }
}

//=== Full Event Conversion ===============================================
//
// Notes:
// - `KeyboardInput` uses the physical key and winit's repeat flag.
// - Sizes and positions are in physical pixels.
// - Unlisted winit events yield `None`.
//

pub(crate) fn translate(event: &WindowEvent) -> Option<AnyEvent> {
    let event = match event {
        //--- Window ------------------------------------------------------
        WindowEvent::CloseRequested => WindowCloseEvent::new().into(),
        WindowEvent::Resized(size) => {
            WindowResizeEvent::new(clamp_i32(size.width), clamp_i32(size.height)).into()
        }
        WindowEvent::Moved(position) => WindowMovedEvent::new(position.x, position.y).into(),
        WindowEvent::Focused(true) => WindowFocusEvent::new().into(),
        WindowEvent::Focused(false) => WindowLostFocusEvent::new().into(),

        //--- Keyboard ----------------------------------------------------
        WindowEvent::KeyboardInput { event, .. } => {
            key_event(event.physical_key.into(), event.state, event.repeat)
        }

        //--- Mouse -------------------------------------------------------
        WindowEvent::MouseInput { state, button, .. } => {
            mouse_button_event((*button).into(), *state)
        }
        WindowEvent::CursorMoved { position, .. } => {
            MouseMovedEvent::new(position.x as f32, position.y as f32).into()
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = scroll_offsets(*delta);
            MouseScrolledEvent::new(x, y).into()
        }

        _ => return None,
    };
    Some(event)
}

fn clamp_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventType;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, TouchPhase};

    fn device() -> DeviceId {
        DeviceId::dummy()
    }

    //=====================================================================
    // Code Conversion Tests
    //=====================================================================

    #[test]
    fn keys_map_by_physical_location() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(WinitKeyCode::F11), KeyCode::F11);
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftLeft), KeyCode::ShiftLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
    }

    #[test]
    fn unmapped_keys_are_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadAdd), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::CapsLock), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_buttons_keep_other_index() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Forward), MouseButton::Forward);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }

    //=====================================================================
    // Event Construction Tests
    //=====================================================================

    #[test]
    fn key_repeat_sets_count() {
        match key_event(KeyCode::KeyA, ElementState::Pressed, true) {
            AnyEvent::KeyPressed(e) => {
                assert_eq!(e.key_code(), KeyCode::KeyA);
                assert_eq!(e.repeat_count(), 1);
            }
            other => panic!("expected KeyPressed, got {:?}", other),
        }

        match key_event(KeyCode::KeyA, ElementState::Pressed, false) {
            AnyEvent::KeyPressed(e) => assert_eq!(e.repeat_count(), 0),
            other => panic!("expected KeyPressed, got {:?}", other),
        }
    }

    #[test]
    fn key_release() {
        let event = key_event(KeyCode::Space, ElementState::Released, false);
        assert_eq!(event.event_type(), EventType::KeyReleased);
    }

    #[test]
    fn mouse_button_states() {
        let pressed = mouse_button_event(MouseButton::Right, ElementState::Pressed);
        let released = mouse_button_event(MouseButton::Right, ElementState::Released);

        assert_eq!(pressed.event_type(), EventType::MouseButtonPressed);
        assert_eq!(released.event_type(), EventType::MouseButtonReleased);
    }

    //=====================================================================
    // Window Event Translation Tests
    //=====================================================================

    #[test]
    fn resize_translates_to_window_resize() {
        match translate(&WindowEvent::Resized(PhysicalSize::new(1024, 800))) {
            Some(AnyEvent::WindowResize(e)) => assert_eq!((e.width(), e.height()), (1024, 800)),
            other => panic!("expected WindowResize, got {:?}", other),
        }
    }

    #[test]
    fn window_notifications_translate() {
        let cases = [
            (WindowEvent::CloseRequested, EventType::WindowClose),
            (WindowEvent::Focused(true), EventType::WindowFocus),
            (WindowEvent::Focused(false), EventType::WindowLostFocus),
            (WindowEvent::Moved(PhysicalPosition::new(10, 20)), EventType::WindowMoved),
        ];

        for (native, expected) in cases {
            let event = translate(&native).map(|e| e.event_type());
            assert_eq!(event, Some(expected), "{:?}", native);
        }
    }

    #[test]
    fn cursor_and_button_translate() {
        let moved = WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(12.5, 40.0),
        };
        match translate(&moved) {
            Some(AnyEvent::MouseMoved(e)) => assert_eq!((e.x(), e.y()), (12.5, 40.0)),
            other => panic!("expected MouseMoved, got {:?}", other),
        }

        let click = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Middle,
        };
        match translate(&click) {
            Some(AnyEvent::MouseButtonPressed(e)) => assert_eq!(e.button(), MouseButton::Middle),
            other => panic!("expected MouseButtonPressed, got {:?}", other),
        }
    }

    #[test]
    fn wheel_pixels_convert_to_lines() {
        let wheel = WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)),
            phase: TouchPhase::Moved,
        };
        match translate(&wheel) {
            Some(AnyEvent::MouseScrolled(e)) => assert_eq!((e.x_offset(), e.y_offset()), (0.0, -2.0)),
            other => panic!("expected MouseScrolled, got {:?}", other),
        }
    }

    #[test]
    fn redraw_is_ignored() {
        assert!(translate(&WindowEvent::RedrawRequested).is_none());
    }
}
