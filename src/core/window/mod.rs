//=========================================================================
// Window Abstraction
//
// Backend-independent window contract, its configuration and the startup
// factory that selects the native implementation.
//
// State Machine:
// ```text
//  Uninitialized ──init()──▶ Initialized ──close()──▶ Closed
//                               │    ▲
//                               └────┘ on_update(): pump events, swap
// ```
//
// Responsibilities:
// - Own exactly one graphics context and one event dispatch table
// - Translate native notifications into typed events (backend side)
// - Keep the per-window input state current before dispatching
//
//=========================================================================

//=== Submodules ==========================================================

mod error;
mod graphics_context;

#[cfg(test)]
pub(crate) mod testing;

//=== Standard Library Imports ============================================

use std::rc::Rc;

//=== External Crates =====================================================

use log::*;

//=== Internal Imports ====================================================

use crate::core::events::{AnyEvent, EventHandler};
use crate::core::input::InputSource;
use crate::platform::WinitWindow;
use crate::renderer::RenderDevice;

//=== Public API ==========================================================

pub use error::{ContextError, WindowError};
pub use graphics_context::GraphicsContext;

//=== WindowProperties ====================================================

/// Creation parameters of a window.
///
/// Defaults: `"My Window"`, 800×600, windowed, vsync off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowProperties {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowProperties {
    fn default() -> Self {
        Self {
            title: "My Window".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: false,
        }
    }
}

impl WindowProperties {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Width over height; `1.0` when the height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

//=== WindowState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Uninitialized,
    Initialized,
    Closed,
}

//--- Transition Guards ---------------------------------------------------
//
// Every backend asks these before acting, so all of them refuse the same
// transitions and log them the same way.
//
impl WindowState {
    /// Whether `init()` may proceed. Only an `Uninitialized` window can be
    /// initialised; a window whose last `init()` failed is still one.
    pub(crate) fn begin_init(self) -> bool {
        if self == WindowState::Uninitialized {
            true
        } else {
            warn!(target: "window", "init() on a {:?} window ignored", self);
            false
        }
    }

    /// Whether `close()` may proceed. Only `Initialized → Closed` exists.
    pub(crate) fn begin_close(self) -> bool {
        if self == WindowState::Initialized {
            true
        } else {
            trace!(target: "window", "close() on a {:?} window ignored", self);
            false
        }
    }

    /// Whether `on_update()` may pump and present.
    ///
    /// Updating before `init()` is a caller bug and asserts in debug
    /// builds. Updating after `close()` is a logged no-op.
    pub(crate) fn begin_update(self) -> bool {
        if self == WindowState::Initialized {
            return true;
        }
        debug_assert!(
            self != WindowState::Uninitialized,
            "on_update() called before init()"
        );
        warn!(target: "window", "on_update() on a {:?} window ignored", self);
        false
    }
}

//=== Window Trait ========================================================

/// Polymorphic window contract implemented by a platform backend.
///
/// All methods run on the thread that created the window. Callbacks
/// installed in the [`EventHandler`] run synchronously inside
/// [`on_update`](Window::on_update) and must not pump events themselves.
pub trait Window {
    //--- Lifecycle --------------------------------------------------------

    /// Creates the native window and its graphics context.
    ///
    /// `Uninitialized → Initialized`. On error the window stays
    /// `Uninitialized` and owns no native resources.
    fn init(&mut self, properties: &WindowProperties) -> Result<(), WindowError>;

    /// Destroys the native window. `Initialized → Closed`.
    ///
    /// A no-op when the window is already closed or was never initialised.
    fn close(&mut self);

    /// Pumps pending native events through the dispatch table, then
    /// presents the frame.
    ///
    /// Only meaningful while `Initialized`.
    fn on_update(&mut self, timestep: f32) -> Result<(), WindowError>;

    //--- Properties -------------------------------------------------------

    /// Toggles the swap interval and updates the stored properties.
    fn set_vsync(&mut self, vsync: bool);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn is_fullscreen(&self) -> bool;

    fn is_vsync(&self) -> bool;

    fn state(&self) -> WindowState;

    fn aspect_ratio(&self) -> f32 {
        if self.height() == 0 {
            1.0
        } else {
            self.width() as f32 / self.height() as f32
        }
    }

    //--- Collaborators ----------------------------------------------------

    fn event_handler(&self) -> &EventHandler;

    fn event_handler_mut(&mut self) -> &mut EventHandler;

    /// Shared handle to this window's live input state.
    fn input_source(&self) -> InputSource;

    /// Device for GPU resource creation, once the context is up.
    fn render_device(&self) -> Option<Rc<dyn RenderDevice>>;
}

//--- deliver() -----------------------------------------------------------
//
// Shared by every backend: update live input state first, then route the
// event through the dispatch table. The input borrow is released before
// the callback runs, so callbacks may poll.
//
pub(crate) fn deliver(handler: &mut EventHandler, input: &InputSource, mut event: AnyEvent) -> bool {
    input.borrow_mut().apply(&event);
    handler.dispatch(&mut event)
}

//=== Factory =============================================================

/// Creates and initialises the platform's native window.
pub fn create(properties: &WindowProperties) -> Result<Box<dyn Window>, WindowError> {
    let mut window = WinitWindow::new()?;
    window.init(properties)?;
    Ok(Box::new(window))
}

//=========================================================================
// Unit Tests
//=========================================================================
