//=========================================================================
// Renderer
//
// GPU resource wrappers over a backend-neutral device.
//
// Responsibilities:
// - Describe vertex data (`ShaderDataType`, `BufferLayout`)
// - Own GPU objects with release-on-drop semantics
//   (`VertexBuffer`, `IndexBuffer`, `VertexArray`, `Shader`, `Texture`)
// - Isolate the graphics API behind `RenderDevice`
//
// Design:
// ```text
//  VertexArray ──owns──▶ VertexBuffer* ─┐
//       │                IndexBuffer?  ─┼──▶ Rc<dyn RenderDevice> ──▶ OpenGlDevice
//  Shader / Texture ────────────────────┘                             (glow)
// ```
// Wrappers are move-only; dropping one deletes its backend object.
//
//=========================================================================

mod buffer_layout;
mod device;
mod error;
mod index_buffer;
mod opengl;
mod render_api;
mod shader;
mod shader_data_type;
mod shader_source;
mod texture;
mod vertex_array;
pub(crate) mod vertex_buffer;

#[cfg(test)]
pub(crate) mod testing;

pub use buffer_layout::{BufferElement, BufferLayout};
pub use device::{
    BufferTarget, BufferUsage, RenderDevice, RenderId, TextureFormat, UniformLocation,
    UniformValue, VertexAttribute,
};
pub use error::RenderError;
pub use index_buffer::IndexBuffer;
pub use opengl::OpenGlDevice;
pub use render_api::RenderApi;
pub use shader::Shader;
pub use shader_data_type::{ScalarType, ShaderDataType};
pub use shader_source::{ShaderSources, ShaderStage};
pub use texture::Texture;
pub use vertex_array::VertexArray;
pub use vertex_buffer::VertexBuffer;
