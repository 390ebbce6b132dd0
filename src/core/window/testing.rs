//=========================================================================
// Scripted Window (test double)
//
// A `Window` with no native backend. Each `on_update` delivers the next
// scripted batch of events exactly as a real backend would: input state
// first, then the dispatch table.
//
//=========================================================================

use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::events::{AnyEvent, EventHandler};
use crate::core::input::{InputSource, InputState};
use crate::core::window::{deliver, Window, WindowError, WindowProperties, WindowState};
use crate::renderer::RenderDevice;

pub(crate) struct ScriptedWindow {
    properties: WindowProperties,
    state: WindowState,
    handler: EventHandler,
    input: InputSource,
    device: Option<Rc<dyn RenderDevice>>,
    frames: VecDeque<Vec<AnyEvent>>,
    on_close: Option<Box<dyn FnMut()>>,
    pub updates: usize,
    pub timesteps: Vec<f32>,
}

impl ScriptedWindow {
    pub fn new() -> Self {
        Self {
            properties: WindowProperties::default(),
            state: WindowState::Uninitialized,
            handler: EventHandler::new(),
            input: InputState::shared(),
            device: None,
            frames: VecDeque::new(),
            on_close: None,
            updates: 0,
            timesteps: Vec::new(),
        }
    }

    /// Already-initialised window with the given properties.
    pub fn initialized(properties: &WindowProperties) -> Self {
        let mut window = Self::new();
        window.init(properties).expect("scripted init never fails");
        window
    }

    pub fn with_device(mut self, device: Rc<dyn RenderDevice>) -> Self {
        self.device = Some(device);
        self
    }

    /// Runs `hook` when the window actually closes, standing in for the
    /// moment a real backend tears down its context.
    pub fn with_close_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    /// Queues one frame's worth of native notifications.
    pub fn push_frame(&mut self, events: Vec<AnyEvent>) {
        self.frames.push_back(events);
    }
}

impl Window for ScriptedWindow {
    fn init(&mut self, properties: &WindowProperties) -> Result<(), WindowError> {
        if !self.state.begin_init() {
            return Ok(());
        }
        self.properties = properties.clone();
        self.state = WindowState::Initialized;
        Ok(())
    }

    fn close(&mut self) {
        if !self.state.begin_close() {
            return;
        }
        if let Some(hook) = self.on_close.as_mut() {
            hook();
        }
        self.state = WindowState::Closed;
    }

    fn on_update(&mut self, timestep: f32) -> Result<(), WindowError> {
        if !self.state.begin_update() {
            return Ok(());
        }
        self.updates += 1;
        self.timesteps.push(timestep);

        for event in self.frames.pop_front().unwrap_or_default() {
            if let AnyEvent::WindowResize(e) = &event {
                self.properties.width = e.width().max(0) as u32;
                self.properties.height = e.height().max(0) as u32;
            }
            deliver(&mut self.handler, &self.input, event);
        }
        Ok(())
    }

    fn set_vsync(&mut self, vsync: bool) {
        self.properties.vsync = vsync;
    }

    fn width(&self) -> u32 {
        self.properties.width
    }

    fn height(&self) -> u32 {
        self.properties.height
    }

    fn is_fullscreen(&self) -> bool {
        self.properties.fullscreen
    }

    fn is_vsync(&self) -> bool {
        self.properties.vsync
    }

    fn state(&self) -> WindowState {
        self.state
    }

    fn event_handler(&self) -> &EventHandler {
        &self.handler
    }

    fn event_handler_mut(&mut self) -> &mut EventHandler {
        &mut self.handler
    }

    fn input_source(&self) -> InputSource {
        self.input.clone()
    }

    fn render_device(&self) -> Option<Rc<dyn RenderDevice>> {
        self.device.clone()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{KeyCode, KeyPressedEvent, WindowResizeEvent};
    use crate::core::input::InputPoller;
    use std::cell::Cell;

    #[test]
    fn lifecycle_follows_state_machine() {
        let mut window = ScriptedWindow::new();
        assert_eq!(window.state(), WindowState::Uninitialized);

        window.close();
        assert_eq!(window.state(), WindowState::Uninitialized, "close before init is a no-op");

        window.init(&WindowProperties::default()).unwrap();
        assert_eq!(window.state(), WindowState::Initialized);

        window.close();
        window.close();
        assert_eq!(window.state(), WindowState::Closed);
    }

    #[test]
    fn init_is_refused_once_initialized_or_closed() {
        let mut window = ScriptedWindow::initialized(&WindowProperties::new("First", 640, 480));

        window.init(&WindowProperties::new("Second", 320, 240)).unwrap();
        assert_eq!(window.width(), 640, "re-init must not replace the properties");

        window.close();
        window.init(&WindowProperties::default()).unwrap();
        assert_eq!(window.state(), WindowState::Closed);
    }

    #[test]
    fn update_after_close_does_nothing() {
        let mut window = ScriptedWindow::initialized(&WindowProperties::default());
        window.close();
        window.on_update(0.016).unwrap();

        assert_eq!(window.updates, 0);
    }

    #[test]
    fn close_hook_runs_once() {
        let closes = Rc::new(Cell::new(0));
        let c = closes.clone();
        let mut window = ScriptedWindow::initialized(&WindowProperties::default())
            .with_close_hook(move || c.set(c.get() + 1));

        window.close();
        window.close();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn input_state_is_updated_before_callback_runs() {
        let mut window = ScriptedWindow::initialized(&WindowProperties::default());
        let mut poller = InputPoller::new();
        poller.set_current_window(window.input_source());
        let poller = Rc::new(poller);

        let seen = Rc::new(Cell::new(false));
        let (p, s) = (poller.clone(), seen.clone());
        window.event_handler_mut().set_on_key_pressed_callback(move |e| {
            s.set(p.is_key_pressed(e.key_code()));
            true
        });

        window.push_frame(vec![KeyPressedEvent::new(KeyCode::KeyW, 0).into()]);
        window.on_update(0.016).unwrap();

        assert!(seen.get());
    }

    #[test]
    fn resize_updates_reported_size() {
        let mut window = ScriptedWindow::initialized(&WindowProperties::default());
        window.push_frame(vec![WindowResizeEvent::new(1024, 800).into()]);
        window.on_update(0.0).unwrap();

        assert_eq!((window.width(), window.height()), (1024, 800));
        assert_eq!(window.aspect_ratio(), 1024.0 / 800.0);
    }

    #[test]
    fn set_vsync_updates_properties_immediately() {
        let mut window = ScriptedWindow::initialized(&WindowProperties::default());
        window.set_vsync(true);
        assert!(window.is_vsync());
    }
}
