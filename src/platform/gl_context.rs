//=========================================================================
// OpenGL Context (glutin)
//
// `GraphicsContext` implementation binding an OpenGL context to a winit
// window through glutin.
//
// Lifecycle:
// ```text
//  DisplayBuilder::build ─▶ (winit Window, gl Config)
//           │
//  GlutinContext::new(window, config)      bound, nothing created yet
//           │
//  init() ─▶ create context ─▶ create surface ─▶ make current ─▶ load glow
//           │
//  swap_buffers() / set_vsync() / resize()
//           │
//  drop ─▶ mark device lost ─▶ destroy surface and context
// ```
//
//=========================================================================

use std::ffi::CString;
use std::fmt;
use std::num::NonZeroU32;
use std::ptr;
use std::rc::Rc;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow;
use log::{debug, info};
use winit::raw_window_handle::HasWindowHandle;
use winit::window::Window as NativeWindow;

use crate::core::window::{ContextError, GraphicsContext};
use crate::renderer::{OpenGlDevice, RenderDevice};

//=== Config Selection ====================================================

/// Framebuffer requirements handed to the display builder.
pub(crate) fn config_template() -> ConfigTemplateBuilder {
    ConfigTemplateBuilder::new().with_alpha_size(8)
}

/// Prefers transparency support, then the highest sample count.
pub(crate) fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            let transparency = config.supports_transparency().unwrap_or(false)
                && !best.supports_transparency().unwrap_or(false);

            if transparency || config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        // glutin-winit only calls the picker after finding at least one config.
        .expect("display offered no OpenGL configs")
}

//=== GlutinContext =======================================================

struct Current {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    device: Rc<OpenGlDevice>,
}

impl Drop for Current {
    // Runs before the fields drop, so any resource still holding the device
    // sees the context as lost before it is gone.
    fn drop(&mut self) {
        self.device.mark_context_lost();
        debug!(target: "platform::gl", "OpenGL context destroyed");
    }
}

pub(crate) struct GlutinContext {
    window: Rc<NativeWindow>,
    config: Config,
    current: Option<Current>,
}

impl GlutinContext {
    pub fn new(window: Rc<NativeWindow>, config: Config) -> Self {
        Self {
            window,
            config,
            current: None,
        }
    }

    fn current(&self) -> Result<&Current, ContextError> {
        self.current.as_ref().ok_or(ContextError::NotInitialized)
    }
}

impl GraphicsContext for GlutinContext {
    fn init(&mut self) -> Result<(), ContextError> {
        if self.current.is_some() {
            debug!(target: "platform::gl", "Context already initialised");
            return Ok(());
        }

        let display = self.config.display();
        let raw_handle = self.window.window_handle().ok().map(|h| h.as_raw());
        let attributes = ContextAttributesBuilder::new().build(raw_handle);

        //--- 1. Context --------------------------------------------------
        let not_current = unsafe { display.create_context(&self.config, &attributes) }
            .map_err(|e| ContextError::Creation(e.to_string()))?;

        //--- 2. Surface --------------------------------------------------
        let surface_attributes = self
            .window
            .build_surface_attributes(Default::default())
            .map_err(|e| ContextError::Surface(e.to_string()))?;
        let surface = unsafe { display.create_window_surface(&self.config, &surface_attributes) }
            .map_err(|e| ContextError::Surface(e.to_string()))?;

        //--- 3. Make current and load function pointers -------------------
        let context = not_current
            .make_current(&surface)
            .map_err(|e| ContextError::MakeCurrent(e.to_string()))?;

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                CString::new(symbol).map_or(ptr::null(), |symbol| display.get_proc_address(&symbol))
            })
        };
        // SAFETY: the context was just made current on this thread and is
        // owned, together with the device, by this object.
        let device = Rc::new(unsafe { OpenGlDevice::new(gl) });

        info!(
            target: "platform::gl",
            "OpenGL context current ({} samples)",
            self.config.num_samples()
        );

        self.current = Some(Current {
            context,
            surface,
            device,
        });
        Ok(())
    }

    fn swap_buffers(&self) -> Result<(), ContextError> {
        let current = self.current()?;
        current
            .surface
            .swap_buffers(&current.context)
            .map_err(|e| ContextError::SwapBuffers(e.to_string()))
    }

    fn set_vsync(&self, vsync: bool) -> Result<(), ContextError> {
        let current = self.current()?;
        let interval = if vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        current
            .surface
            .set_swap_interval(&current.context, interval)
            .map_err(|e| ContextError::SwapInterval(e.to_string()))?;
        debug!(target: "platform::gl", "VSync {}", if vsync { "on" } else { "off" });
        Ok(())
    }

    fn resize(&self, width: u32, height: u32) {
        // Minimised windows report 0×0; the surface keeps its last size.
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        if let Some(current) = &self.current {
            current.surface.resize(&current.context, width, height);
        }
    }

    fn render_device(&self) -> Option<Rc<dyn RenderDevice>> {
        self.current
            .as_ref()
            .map(|current| Rc::clone(&current.device) as Rc<dyn RenderDevice>)
    }
}

impl fmt::Debug for GlutinContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlutinContext")
            .field("samples", &self.config.num_samples())
            .field("initialized", &self.current.is_some())
            .finish()
    }
}
