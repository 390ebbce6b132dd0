//=========================================================================
// Application
//
// Top-level driver: owns the window, wires its close event to the loop
// and runs frames until something asks it to stop.
//
// Architecture:
// ```text
//  ApplicationBuilder ──build()──▶ Application ──run(on_frame)──▶ [frame loop]
//        │                              │
//        ├─ with_title() / with_size()  ├─ timestep = FrameTimer::tick()
//        ├─ with_vsync() / ...          ├─ on_frame(&mut FrameContext, dt)
//        └─ with_render_api()           └─ window.on_update(dt)
// ```
//
// Startup order (build):
//   logging → render API check → window + context → input poller
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

//=== External Crates =====================================================

use log::{debug, info, trace};
use thiserror::Error;

//=== Internal Imports ====================================================

use crate::core::events::{Event, EventHandler};
use crate::core::input::InputPoller;
use crate::core::timer::FrameTimer;
use crate::core::window::{self, Window, WindowError, WindowProperties, WindowState};
use crate::logging;
use crate::renderer::{RenderApi, RenderDevice, RenderError};

//=== ApplicationError ====================================================

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

//=== ApplicationBuilder ==================================================

/// Builder for configuring and constructing an [`Application`].
///
/// # Default Values
///
/// - **Window**: [`WindowProperties::default()`] ("My Window", 800×600)
/// - **Render API**: OpenGL
/// - **Log filter**: `"info"` (`RUST_LOG` wins when set)
///
/// # Examples
///
/// ```no_run
/// use ember::ApplicationBuilder;
///
/// let mut app = ApplicationBuilder::new()
///     .with_title("Sandbox")
///     .with_size(1280, 720)
///     .with_vsync(true)
///     .build()?;
///
/// app.run(|frame, _dt| {
///     if frame.input().is_key_pressed(ember::core::events::KeyCode::Escape) {
///         frame.request_close();
///     }
/// })?;
/// # Ok::<(), ember::ApplicationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    properties: WindowProperties,
    render_api: RenderApi,
    log_filter: String,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            properties: WindowProperties::default(),
            render_api: RenderApi::default(),
            log_filter: logging::DEFAULT_FILTER.to_string(),
        }
    }

    /// Replaces every window setting at once.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_properties(mut self, properties: WindowProperties) -> Self {
        assert_nonzero_size(properties.width, properties.height);
        self.properties = properties;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.properties.title = title.into();
        self
    }

    /// Sets the initial client area size in physical pixels.
    ///
    /// Default: 800×600
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert_nonzero_size(width, height);
        self.properties.width = width;
        self.properties.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.properties.vsync = vsync;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.properties.fullscreen = fullscreen;
        self
    }

    /// Selects the rendering backend. Only OpenGL builds successfully.
    pub fn with_render_api(mut self, api: RenderApi) -> Self {
        self.render_api = api;
        self
    }

    /// Fallback log filter used when `RUST_LOG` is unset.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn properties(&self) -> &WindowProperties {
        &self.properties
    }

    /// Starts every system in order and opens the window.
    pub fn build(self) -> Result<Application, ApplicationError> {
        logging::init_with_filter(&self.log_filter);
        info!(
            target: "application",
            "Building application ('{}', {}x{}, {:?})",
            self.properties.title,
            self.properties.width,
            self.properties.height,
            self.render_api
        );

        self.render_api.ensure_supported()?;
        let window = window::create(&self.properties)?;

        Ok(Application::from_window(window, InputPoller::new()))
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn assert_nonzero_size(width: u32, height: u32) {
    assert!(
        width > 0 && height > 0,
        "Window size must be positive, got {}x{}",
        width,
        height
    );
}

//=== FrameContext ========================================================

/// What a frame callback may see and do.
pub struct FrameContext<'a> {
    input: &'a InputPoller,
    device: Option<Rc<dyn RenderDevice>>,
    width: u32,
    height: u32,
    running: &'a Cell<bool>,
}

impl FrameContext<'_> {
    /// Live input of the application's window.
    pub fn input(&self) -> &InputPoller {
        self.input
    }

    /// Device for GPU resources; `None` for windows without a context.
    pub fn render_device(&self) -> Option<&Rc<dyn RenderDevice>> {
        self.device.as_ref()
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Ends the loop after this frame; the window is not presented again.
    pub fn request_close(&self) {
        self.running.set(false);
    }
}

//=== Application =========================================================

/// Engine runtime: one window, one input poller, one frame loop.
pub struct Application {
    window: Box<dyn Window>,
    input: InputPoller,
    running: Rc<Cell<bool>>,
    timer: FrameTimer,
}

impl Application {
    /// Drives an already-initialised window.
    ///
    /// Installs a close callback that stops the loop and makes the
    /// window's input current in `input`.
    pub fn from_window(mut window: Box<dyn Window>, mut input: InputPoller) -> Self {
        let running = Rc::new(Cell::new(true));

        let flag = Rc::clone(&running);
        window
            .event_handler_mut()
            .set_on_window_close_callback(move |event| {
                flag.set(false);
                event.set_handled(true);
                true
            });
        input.set_current_window(window.input_source());

        debug!(
            target: "application",
            "Application attached to {}x{} window",
            window.width(),
            window.height()
        );
        Self {
            window,
            input,
            running,
            timer: FrameTimer::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs frames until the window is closed or a close is requested,
    /// then closes the window.
    ///
    /// `on_frame` is dropped before the window closes, so GPU resources it
    /// owns are released while their context still exists.
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<(), ApplicationError>
    where
        F: FnMut(&mut FrameContext<'_>, f32),
    {
        info!(target: "application", "Entering frame loop");
        let result = self.frame_loop(&mut on_frame);

        drop(on_frame);
        self.window.close();
        self.input.clear_current_window();
        info!(target: "application", "Frame loop finished");
        result
    }

    fn frame_loop<F>(&mut self, on_frame: &mut F) -> Result<(), ApplicationError>
    where
        F: FnMut(&mut FrameContext<'_>, f32),
    {
        let mut fps_timer = FrameTimer::new();
        let mut frames = 0u32;
        self.timer.start();

        while self.is_running() {
            let timestep = self.timer.tick();

            frames += 1;
            if fps_timer.elapsed() >= 1.0 {
                trace!(target: "application", "FPS: {}", frames);
                frames = 0;
                fps_timer.reset();
            }

            let mut frame = FrameContext {
                input: &self.input,
                device: self.window.render_device(),
                width: self.window.width(),
                height: self.window.height(),
                running: &self.running,
            };
            on_frame(&mut frame, timestep);

            if !self.is_running() {
                break;
            }
            self.window.on_update(timestep)?;
        }
        Ok(())
    }

    /// Stops the loop before the next frame.
    pub fn request_close(&self) {
        self.running.set(false);
    }

    /// Shared flag that stops the loop when set to `false`.
    pub fn close_handle(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running.get() && self.window.state() == WindowState::Initialized
    }

    //--- Accessors --------------------------------------------------------

    pub fn window(&self) -> &dyn Window {
        self.window.as_ref()
    }

    pub fn window_mut(&mut self) -> &mut dyn Window {
        self.window.as_mut()
    }

    /// Dispatch table of the window, for installing callbacks.
    ///
    /// Replacing the close callback detaches it from the loop; use
    /// [`close_handle`](Self::close_handle) to keep stopping it.
    pub fn event_handler_mut(&mut self) -> &mut EventHandler {
        self.window.event_handler_mut()
    }

    pub fn input(&self) -> &InputPoller {
        &self.input
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("window_state", &self.window.state())
            .field("running", &self.running.get())
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
