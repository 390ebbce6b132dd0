//=========================================================================
// Renderer Errors
//=========================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::renderer::{RenderApi, ShaderStage};

/// Failures creating or editing GPU resources.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A shader data type name that is not part of the closed set.
    #[error("unsupported shader data type: {0}")]
    UnsupportedType(String),

    #[error("{0:?} rendering is not supported")]
    UnsupportedApi(RenderApi),

    /// The backend refused to allocate a resource id.
    #[error("GPU resource creation failed: {0}")]
    ResourceCreation(String),

    #[error("{stage:?} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {0}")]
    ShaderLink(String),

    /// A required stage had no source.
    #[error("shader program has no {0:?} stage")]
    MissingStage(ShaderStage),

    #[error("could not read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image decoding failed")]
    Image(#[from] image::ImageError),

    #[error("invalid texture data: {0}")]
    InvalidTextureData(String),

    /// An edit that would write past the end of the allocation.
    #[error("write of {len} bytes at offset {offset} exceeds buffer size {capacity}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
