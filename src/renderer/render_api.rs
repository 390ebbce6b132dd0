//=========================================================================
// Render API Selection
//=========================================================================

use log::error;

use crate::renderer::RenderError;

/// Rendering backend family.
///
/// Selected once at startup. Only [`RenderApi::OpenGl`] has an
/// implementation; the others exist so configuration can name them and
/// be rejected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderApi {
    None,
    #[default]
    OpenGl,
    Direct3D,
    Vulkan,
}

impl RenderApi {
    pub fn is_supported(self) -> bool {
        matches!(self, Self::OpenGl)
    }

    /// Returns `Ok(self)` for a supported API, `UnsupportedApi` otherwise.
    pub fn ensure_supported(self) -> Result<Self, RenderError> {
        if self.is_supported() {
            Ok(self)
        } else {
            error!(target: "renderer", "{:?} rendering is currently not supported", self);
            Err(RenderError::UnsupportedApi(self))
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
