//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use ember::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application driver
pub use crate::application::{Application, ApplicationBuilder, ApplicationError, FrameContext};

// Events and dispatch
pub use crate::core::events::{AnyEvent, Event, EventCategory, EventHandler, EventType, KeyCode, MouseButton};

// Input polling
pub use crate::core::input::InputPoller;

// Window
pub use crate::core::window::{Window, WindowProperties};

// Rendering
pub use crate::renderer::{
    BufferLayout, IndexBuffer, RenderDevice, Shader, ShaderDataType, Texture, VertexArray,
    VertexBuffer,
};

// Cameras
pub use crate::camera::{Camera, CameraController, CameraControllerEuler, EulerCameraProps};
