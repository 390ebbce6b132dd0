//=========================================================================
// Render Device
//
// Backend seam for GPU resource management.
//
// Resource wrappers (`VertexBuffer`, `Shader`, `Texture`, ...) hold an
// `Rc<dyn RenderDevice>` and talk to the GPU exclusively through this
// trait. The OpenGL implementation lives in `renderer::opengl`; tests use
// a recording double.
//
// Conventions:
// - Resource ids are plain non-zero `u32`s; `0` is never handed out.
// - `bind_*(None)` unbinds the target.
// - Methods take `&self`: the device is single-threaded and shared.
//
//=========================================================================

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::renderer::{RenderError, ScalarType, ShaderStage};

/// Backend resource handle.
pub type RenderId = u32;

//=== Descriptors =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Vertex,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StaticDraw,
    DynamicDraw,
}

/// One vertex attribute slot of the bound vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub index: u32,
    pub component_count: u32,
    pub scalar_type: ScalarType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
}

/// Pixel layout of texture data, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    R8,
    Rgb8,
    Rgba8,
}

impl TextureFormat {
    /// Format for a channel count of 1, 3 or 4.
    pub fn from_channels(channels: u32) -> Option<Self> {
        match channels {
            1 => Some(Self::R8),
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    pub fn channels(self) -> u32 {
        match self {
            Self::R8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Location of a named uniform inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Mat4(Mat4),
}

//=== RenderDevice ========================================================

pub trait RenderDevice {
    //--- Buffers ----------------------------------------------------------

    /// Allocates a buffer, binds it to `target` and uploads `data`.
    fn create_buffer(
        &self,
        target: BufferTarget,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<RenderId, RenderError>;

    /// Overwrites `data.len()` bytes starting at `offset`.
    fn update_buffer(&self, target: BufferTarget, id: RenderId, offset: usize, data: &[u8]);

    fn bind_buffer(&self, target: BufferTarget, id: Option<RenderId>);

    fn delete_buffer(&self, id: RenderId);

    //--- Vertex Arrays ----------------------------------------------------

    fn create_vertex_array(&self) -> Result<RenderId, RenderError>;

    fn bind_vertex_array(&self, id: Option<RenderId>);

    /// Enables and describes one attribute of the bound vertex array,
    /// sourced from the bound vertex buffer.
    fn enable_vertex_attribute(&self, attribute: &VertexAttribute);

    fn delete_vertex_array(&self, id: RenderId);

    //--- Shaders ----------------------------------------------------------

    fn create_shader(&self, stage: ShaderStage) -> Result<RenderId, RenderError>;

    /// Compiles `source`; on failure returns the driver's info log.
    fn compile_shader(&self, id: RenderId, source: &str) -> Result<(), String>;

    fn delete_shader(&self, id: RenderId);

    fn create_program(&self) -> Result<RenderId, RenderError>;

    fn attach_shader(&self, program: RenderId, shader: RenderId);

    fn detach_shader(&self, program: RenderId, shader: RenderId);

    /// Links the program; on failure returns the driver's info log.
    fn link_program(&self, program: RenderId) -> Result<(), String>;

    fn use_program(&self, program: Option<RenderId>);

    fn delete_program(&self, program: RenderId);

    fn uniform_location(&self, program: RenderId, name: &str) -> Option<UniformLocation>;

    /// Uploads a value to a uniform of the program in use.
    fn set_uniform(&self, location: UniformLocation, value: UniformValue);

    //--- Textures ---------------------------------------------------------

    /// Allocates a 2D texture with linear filtering, repeat wrapping and
    /// mipmaps, uploading `data` (tightly packed rows).
    fn create_texture(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: &[u8],
    ) -> Result<RenderId, RenderError>;

    /// Replaces a sub-rectangle and regenerates mipmaps.
    #[allow(clippy::too_many_arguments)]
    fn update_texture(
        &self,
        id: RenderId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: &[u8],
    );

    fn bind_texture(&self, slot: u32, id: Option<RenderId>);

    fn delete_texture(&self, id: RenderId);
}

//=========================================================================
// Unit Tests
//=========================================================================
