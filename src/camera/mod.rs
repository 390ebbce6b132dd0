//=========================================================================
// Cameras
//
// View/projection matrix pair plus controllers that drive it from polled
// input each frame.
//
// Per frame:
// ```text
//  InputPoller ──▶ CameraController::on_update(dt) ──▶ Camera { view, projection }
//                                                          │
//                                    Shader::upload_mat4("u_view", ...)
// ```
//
//=========================================================================

mod euler;

use glam::Mat4;

use crate::core::events::WindowResizeEvent;
use crate::core::input::InputPoller;

pub use euler::{CameraControllerEuler, EulerCameraProps};

//=== Camera ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    /// Sets the view from the camera's world transform.
    pub fn update_view(&mut self, transform: &Mat4) {
        self.view = transform.inverse();
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

//=== CameraController ====================================================

pub trait CameraController {
    fn camera(&self) -> &Camera;

    /// Advances the controller by `timestep` seconds of polled input.
    fn on_update(&mut self, timestep: f32, input: &InputPoller);

    /// Adapts the projection to a new framebuffer size.
    fn on_resize(&mut self, _event: &WindowResizeEvent) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
