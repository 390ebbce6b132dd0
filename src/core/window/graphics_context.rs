//=========================================================================
// Graphics Context
//
// The backend-specific object a window owns to render and present frames.
//
// Lifecycle:
//   construct (bound to a native window) → init() → swap_buffers()*
//
//=========================================================================

use std::rc::Rc;

use crate::core::window::ContextError;
use crate::renderer::RenderDevice;

/// Surface binding between a native window and a rendering API.
pub trait GraphicsContext {
    /// Creates the API context on the native surface and makes it current.
    ///
    /// Failure is returned, never only logged.
    fn init(&mut self) -> Result<(), ContextError>;

    /// Presents the back buffer.
    fn swap_buffers(&self) -> Result<(), ContextError>;

    /// Sets the swap interval: 1 when `vsync`, 0 otherwise.
    fn set_vsync(&self, vsync: bool) -> Result<(), ContextError>;

    /// Resizes the drawable surface to match the native window.
    fn resize(&self, width: u32, height: u32);

    /// Device for creating GPU resources, available after `init()`.
    fn render_device(&self) -> Option<Rc<dyn RenderDevice>>;
}
