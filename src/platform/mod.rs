//=========================================================================
// Platform Subsystem
//
// Native window backend built on winit (windowing, events) and glutin
// (OpenGL context).
//
// Architecture:
// ```text
//  Application thread (single)
//  ┌────────────────────────────────────────────────────────┐
//  │ Window::on_update(dt)                                   │
//  │   ↓ pump_app_events(0 ms)                               │
//  │ ApplicationHandler::window_event                        │
//  │   ├─ event_mapper::translate → AnyEvent                 │
//  │   ├─ InputState::apply        (live polling state)      │
//  │   └─ EventHandler::dispatch   (user callbacks)          │
//  │   ↓                                                     │
//  │ GraphicsContext::swap_buffers                           │
//  └────────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Pump, don't run**: the event loop is pumped once per frame so the
//   application keeps ownership of its main loop.
// - **Window created from an active loop**: the first request is served
//   in `resumed()`; later ones (a retry after a failed `init()`) in
//   `about_to_wait()`, since `resumed()` does not fire again.
// - **One window per process**: winit allows a single event loop.
//
// Responsibilities:
// - Create and destroy the OS window and its GL context
// - Convert winit events into typed engine events
// - Keep the window's input state current
// - Present frames and apply vsync
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod gl_context;

//=== Standard Library Imports ============================================

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

//=== External Crates =====================================================

use glutin_winit::DisplayBuilder;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Fullscreen, Window as NativeWindow, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::events::{AnyEvent, EventHandler};
use crate::core::input::{InputSource, InputState};
use crate::core::window::{
    deliver, ContextError, GraphicsContext, Window, WindowError, WindowProperties, WindowState,
};
use crate::renderer::RenderDevice;
use gl_context::GlutinContext;

/// Pump attempts `init()` makes while waiting for `resumed()`.
const MAX_INIT_PUMPS: usize = 100;

/// Wait per pump attempt during `init()`.
const INIT_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

//=== Native ==============================================================

/// OS window plus the context rendering into it.
struct Native {
    // Context first: it must be dropped before the window it targets.
    context: GlutinContext,
    window: Rc<NativeWindow>,
}

//=== CreationRequest =====================================================

/// Tracks a pending window request against the loop's resume state.
///
/// winit only lets windows be built from an [`ActiveEventLoop`], and only
/// after the first `resumed()`. A request made before that waits for it;
/// a request made afterwards is handed out on the next loop iteration.
#[derive(Debug, Default)]
struct CreationRequest {
    properties: Option<WindowProperties>,
    resumed: bool,
}

impl CreationRequest {
    fn request(&mut self, properties: &WindowProperties) {
        self.properties = Some(properties.clone());
    }

    fn cancel(&mut self) {
        self.properties = None;
    }

    fn on_resumed(&mut self) -> Option<WindowProperties> {
        self.resumed = true;
        self.properties.take()
    }

    fn on_suspended(&mut self) {
        self.resumed = false;
    }

    /// Hands out the request once the loop has resumed at least once.
    fn on_iteration(&mut self) -> Option<WindowProperties> {
        if self.resumed {
            self.properties.take()
        } else {
            None
        }
    }
}

//=== WinitWindow =========================================================

/// The [`Window`] implementation for desktop platforms.
///
/// # Lifecycle
///
/// 1. **Construction**: `WinitWindow::new()` creates the event loop only
/// 2. **Init**: `init(props)` pumps until window + context exist; a failed
///    `init()` leaves the window `Uninitialized` and may be retried
/// 3. **Frames**: `on_update(dt)` pumps pending events, then swaps buffers
/// 4. **Close**: `close()` drops context and window; repeat calls are no-ops
pub(crate) struct WinitWindow {
    event_loop: Option<EventLoop<()>>,
    properties: WindowProperties,
    state: WindowState,
    handler: EventHandler,
    input: InputSource,
    native: Option<Native>,

    /// Set by `init()`, consumed by `resumed()` or `about_to_wait()`.
    pending: CreationRequest,
    init_error: Option<WindowError>,
}

impl WinitWindow {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Result<Self, WindowError> {
        let event_loop = EventLoop::new().map_err(|e| {
            error!(target: "platform", "Event loop creation failed: {}", e);
            WindowError::WindowCreationFailed(e.to_string())
        })?;

        debug!(target: "platform", "Event loop created");
        Ok(Self {
            event_loop: Some(event_loop),
            properties: WindowProperties::default(),
            state: WindowState::Uninitialized,
            handler: EventHandler::new(),
            input: InputState::shared(),
            native: None,
            pending: CreationRequest::default(),
            init_error: None,
        })
    }

    //--- Internal Helpers -------------------------------------------------

    /// Pumps the event loop once, routing events through `self`.
    ///
    /// Returns `false` when winit reports the loop has exited.
    fn pump(&mut self, timeout: Duration) -> bool {
        let Some(mut event_loop) = self.event_loop.take() else {
            return false;
        };
        let status = event_loop.pump_app_events(Some(timeout), self);
        self.event_loop = Some(event_loop);

        match status {
            PumpStatus::Continue => true,
            PumpStatus::Exit(code) => {
                warn!(target: "platform", "Event loop exited with code {}", code);
                false
            }
        }
    }

    /// Builds the OS window and its context from an active event loop.
    fn create_native(
        event_loop: &ActiveEventLoop,
        properties: &WindowProperties,
    ) -> Result<Native, WindowError> {
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes(properties)))
            .build(event_loop, gl_context::config_template(), gl_context::pick_config)
            .map_err(|e| WindowError::WindowCreationFailed(e.to_string()))?;

        let window = window
            .map(Rc::new)
            .ok_or_else(|| WindowError::WindowCreationFailed("display built no window".into()))?;

        let mut context = GlutinContext::new(Rc::clone(&window), config);
        context.init().map_err(WindowError::ContextInitFailed)?;
        if let Err(e) = context.set_vsync(properties.vsync) {
            warn!(target: "platform", "Initial vsync setting rejected: {}", e);
        }

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        Ok(Native { context, window })
    }

    /// Serves a pending creation request, recording failures for `init()`.
    fn create_pending(&mut self, event_loop: &ActiveEventLoop, properties: WindowProperties) {
        if self.native.is_some() {
            return;
        }
        match Self::create_native(event_loop, &properties) {
            Ok(native) => self.native = Some(native),
            Err(e) => self.init_error = Some(e),
        }
    }

    fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        self.properties.width = size.width;
        self.properties.height = size.height;
        if let Some(native) = &self.native {
            native.context.resize(size.width, size.height);
        }
    }
}

//--- window_attributes() -------------------------------------------------
//
// Fullscreen is borderless on the current monitor.
//
fn window_attributes(properties: &WindowProperties) -> WindowAttributes {
    let attributes = WindowAttributes::default()
        .with_title(properties.title.clone())
        .with_inner_size(PhysicalSize::new(properties.width, properties.height));

    if properties.fullscreen {
        attributes.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attributes
    }
}

//=== Window Implementation ===============================================

impl Window for WinitWindow {
    fn init(&mut self, properties: &WindowProperties) -> Result<(), WindowError> {
        if !self.state.begin_init() {
            return Ok(());
        }

        info!(
            target: "platform",
            "Creating window '{}' ({}x{})",
            properties.title,
            properties.width,
            properties.height
        );
        self.properties = properties.clone();
        self.init_error = None;
        self.pending.request(properties);

        for _ in 0..MAX_INIT_PUMPS {
            if self.native.is_some() || self.init_error.is_some() {
                break;
            }
            if !self.pump(INIT_PUMP_TIMEOUT) {
                break;
            }
        }
        self.pending.cancel();

        if let Some(err) = self.init_error.take() {
            error!(target: "platform", "Window init failed: {}", err);
            return Err(err);
        }
        let Some(native) = &self.native else {
            return Err(WindowError::WindowCreationFailed(
                "event loop never resumed".into(),
            ));
        };

        let size = native.window.inner_size();
        self.properties.width = size.width;
        self.properties.height = size.height;
        self.state = WindowState::Initialized;
        Ok(())
    }

    fn close(&mut self) {
        if !self.state.begin_close() {
            return;
        }
        self.native = None;
        self.input.borrow_mut().release_all();
        self.state = WindowState::Closed;
        info!(target: "platform", "Window '{}' closed", self.properties.title);
    }

    fn on_update(&mut self, _timestep: f32) -> Result<(), WindowError> {
        if !self.state.begin_update() {
            return Ok(());
        }

        self.pump(Duration::ZERO);

        match &self.native {
            Some(native) => native.context.swap_buffers().map_err(WindowError::Present),
            None => Ok(()),
        }
    }

    fn set_vsync(&mut self, vsync: bool) {
        self.properties.vsync = vsync;
        let result = match &self.native {
            Some(native) => native.context.set_vsync(vsync),
            None => Err(ContextError::NotInitialized),
        };
        if let Err(e) = result {
            warn!(target: "platform", "Could not apply vsync={}: {}", vsync, e);
        }
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
        Rc::clone(&self.input)
    }

    fn render_device(&self) -> Option<Rc<dyn RenderDevice>> {
        self.native
            .as_ref()
            .and_then(|native| native.context.render_device())
    }
}

impl fmt::Debug for WinitWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinitWindow")
            .field("properties", &self.properties)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WinitWindow {
    /// Creates window and context when `init()` asked for them.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.native.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
        }
        if let Some(properties) = self.pending.on_resumed() {
            self.create_pending(event_loop, properties);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Event loop suspended");
        self.pending.on_suspended();
    }

    /// Serves requests made after the first resume, e.g. an `init()` retry.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(properties) = self.pending.on_iteration() {
            debug!(target: "platform", "Creating window on an already resumed loop");
            self.create_pending(event_loop, properties);
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::Resized(size) = &event {
            self.handle_resize(*size);
        }

        let Some(event) = event_mapper::translate(&event) else {
            return;
        };
        if let AnyEvent::WindowClose(_) = event {
            info!(target: "platform", "Window close requested");
        } else {
            trace!(target: "platform::input", "{:?}", event.event_type());
        }

        deliver(&mut self.handler, &self.input, event);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
//
// Event loop and GL context need a display server; only the pure helpers
// are covered here.
//
