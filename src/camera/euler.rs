//=========================================================================
// Euler Camera Controller
//
// First-person camera driven by yaw/pitch angles.
//
// Controls:
// - W / S            move along the view direction, height unchanged
// - A / D            strafe
// - Right mouse held rotate by cursor delta
//
// Transform:
// ```text
//  model = T(position) · Rx(pitch) · Ry(yaw)      view = model⁻¹
// ```
// Movement uses the basis of the previous frame's model matrix.
//
//=========================================================================

use glam::{Mat4, Vec2, Vec3};
use log::debug;

use crate::camera::{Camera, CameraController};
use crate::core::events::{KeyCode, MouseButton, WindowResizeEvent};
use crate::core::input::InputPoller;

/// Pitch limit in degrees, keeps the view off the poles.
const PITCH_LIMIT: f32 = 89.0;

//=== EulerCameraProps ====================================================

/// Angles and field of view are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerCameraProps {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub translation_speed: f32,
    pub rotation_speed: f32,
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for EulerCameraProps {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            translation_speed: 2.0,
            rotation_speed: 2.0,
            fov_y: 45.0,
            aspect_ratio: 16.0 / 9.0,
            near_clip: 0.1,
            far_clip: 100.0,
        }
    }
}

impl EulerCameraProps {
    fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y.to_radians(),
            self.aspect_ratio,
            self.near_clip,
            self.far_clip,
        )
    }

    fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
    }
}

//=== CameraControllerEuler ===============================================

#[derive(Debug, Clone)]
pub struct CameraControllerEuler {
    props: EulerCameraProps,
    camera: Camera,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
    /// Cursor sample of the previous frame while rotating.
    last_mouse: Option<Vec2>,
}

impl CameraControllerEuler {
    pub fn new(props: EulerCameraProps) -> Self {
        let mut controller = Self {
            props,
            camera: Camera {
                view: Mat4::IDENTITY,
                projection: props.projection(),
            },
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            last_mouse: None,
        };
        controller.rebuild();
        controller
    }

    pub fn props(&self) -> &EulerCameraProps {
        &self.props
    }

    pub fn position(&self) -> Vec3 {
        self.props.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    //--- Internal Helpers -------------------------------------------------

    fn rebuild(&mut self) {
        let model = self.props.model();
        self.camera.update_view(&model);

        self.forward = -model.z_axis.truncate();
        self.up = model.y_axis.truncate();
        self.right = model.x_axis.truncate();
    }

    fn translate(&mut self, timestep: f32, input: &InputPoller) -> bool {
        let step = self.props.translation_speed * timestep;
        let mut moved = false;

        let height = self.props.position.y;
        if input.is_key_pressed(KeyCode::KeyW) {
            self.props.position += self.forward * step;
            moved = true;
        }
        if input.is_key_pressed(KeyCode::KeyS) {
            self.props.position -= self.forward * step;
            moved = true;
        }
        self.props.position.y = height;

        if input.is_key_pressed(KeyCode::KeyA) {
            self.props.position -= self.right * step;
            moved = true;
        }
        if input.is_key_pressed(KeyCode::KeyD) {
            self.props.position += self.right * step;
            moved = true;
        }

        moved
    }

    fn rotate(&mut self, timestep: f32, input: &InputPoller) -> bool {
        if !input.is_mouse_button_pressed(MouseButton::Right) {
            self.last_mouse = None;
            return false;
        }

        let current = input.mouse_position();
        if current.x < 0.0 {
            // Cursor left the window.
            self.last_mouse = None;
            return false;
        }

        let Some(last) = self.last_mouse.replace(current) else {
            return false;
        };

        let delta = current - last;
        let step = self.props.rotation_speed * timestep;
        self.props.yaw -= delta.x * step;
        self.props.pitch = (self.props.pitch - delta.y * step).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        true
    }
}

impl Default for CameraControllerEuler {
    fn default() -> Self {
        Self::new(EulerCameraProps::default())
    }
}

impl CameraController for CameraControllerEuler {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn on_update(&mut self, timestep: f32, input: &InputPoller) {
        let moved = self.translate(timestep, input);
        let rotated = self.rotate(timestep, input);

        if moved || rotated {
            self.rebuild();
        }
    }

    fn on_resize(&mut self, event: &WindowResizeEvent) {
        if event.height() <= 0 || event.width() <= 0 {
            return;
        }
        self.props.aspect_ratio = event.width() as f32 / event.height() as f32;
        self.camera.projection = self.props.projection();
        debug!(target: "camera", "Aspect ratio now {:.3}", self.props.aspect_ratio);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
