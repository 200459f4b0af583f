use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use stilllife_input::Movement;

/// Pitch stays strictly inside ±89 degrees so the view never flips over.
pub const MAX_PITCH: f32 = 88.99;

/// First-person camera. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view used by the perspective projection.
    pub zoom: f32,
    pub movement_speed: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 15.0, 20.0),
            front: Vec3::new(0.0, -0.5, -2.0),
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            zoom: 80.0,
            movement_speed: 20.0,
            sensitivity: 0.1,
        }
    }
}

impl FlyCamera {
    /// Turn the camera by cursor offsets (Y already flipped so up is positive).
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        self.update_vectors();
    }

    /// Translate by `movement_speed * delta_time` in the given direction.
    pub fn process_keyboard(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.strafe_axis() * velocity,
            Movement::Right => self.position += self.strafe_axis() * velocity,
            Movement::Up => self.position += self.world_up * velocity,
            Movement::Down => self.position -= self.world_up * velocity,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Overwrite position, facing and up with a preset pose. Yaw and pitch
    /// are left alone.
    pub fn snap_to(&mut self, preset: ViewPreset) {
        let pose = preset.pose();
        self.position = pose.position;
        self.up = pose.up;
        self.front = pose.front;
    }

    fn strafe_axis(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Position, facing and up for a fixed viewpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
}

/// One-shot viewpoints bound to the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewPreset {
    Front,
    Right,
    Top,
    Left,
}

impl ViewPreset {
    pub fn pose(self) -> CameraPose {
        match self {
            ViewPreset::Front => CameraPose {
                position: Vec3::new(0.0, 5.0, 25.0),
                front: Vec3::NEG_Z,
                up: Vec3::Y,
            },
            ViewPreset::Right => CameraPose {
                position: Vec3::new(25.0, 5.0, 0.0),
                front: Vec3::NEG_X,
                up: Vec3::Y,
            },
            ViewPreset::Top => CameraPose {
                position: Vec3::new(0.0, 30.0, 0.01),
                front: Vec3::NEG_Y,
                up: Vec3::NEG_Z,
            },
            ViewPreset::Left => CameraPose {
                position: Vec3::new(-20.0, 8.0, 20.0),
                front: Vec3::new(1.0, -0.3, -1.0).normalize(),
                up: Vec3::Y,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = FlyCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 15.0, 20.0));
        assert_eq!(cam.zoom, 80.0);
        let view = cam.view_matrix();
        assert!(!view.col(0).x.is_nan());
    }

    #[test]
    fn camera_movement() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        cam.process_keyboard(Movement::Forward, 1.0);
        assert_ne!(cam.position, start);
        cam.process_keyboard(Movement::Backward, 1.0);
        assert!(cam.position.abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn vertical_movement_follows_world_up() {
        let mut cam = FlyCamera::default();
        cam.process_keyboard(Movement::Up, 0.5);
        assert!((cam.position.y - 25.0).abs() < 1e-5);
        cam.process_keyboard(Movement::Down, 0.25);
        assert!((cam.position.y - 20.0).abs() < 1e-5);
    }

    #[test]
    fn strafe_is_perpendicular_to_front() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(0.0, 0.0);
        let start = cam.position;
        cam.process_keyboard(Movement::Right, 1.0);
        let moved = cam.position - start;
        assert!(moved.dot(cam.front).abs() < 1e-4);
        assert!((moved.length() - cam.movement_speed).abs() < 1e-3);
        // Facing -Z, right is +X.
        assert!(moved.x > 0.0);
    }

    #[test]
    fn mouse_recomputes_front_from_angles() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(0.0, 0.0);
        assert!(cam.front.abs_diff_eq(Vec3::NEG_Z, 1e-5));

        // 900 * 0.1 = 90 degrees of yaw: -90 -> 0 faces +X.
        cam.process_mouse_movement(900.0, 0.0);
        assert!((cam.yaw - 0.0).abs() < 1e-3);
        assert!(cam.front.abs_diff_eq(Vec3::X, 1e-4));
        assert!((cam.front.length() - 1.0).abs() < 1e-5);
        assert!(cam.up.dot(cam.front).abs() < 1e-5);
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(10_000.0, 0.0);
        assert!((cam.yaw - 910.0).abs() < 1e-2);
    }

    #[test]
    fn pitch_stays_strictly_inside_limits() {
        let mut cam = FlyCamera::default();
        let offsets = [500.0, 3000.0, -8000.0, 20.0, -1.0, 90_000.0, -90_000.0, 1780.0];
        for dy in offsets {
            cam.process_mouse_movement(dy * 0.3, dy);
            assert!(cam.pitch > -89.0 && cam.pitch < 89.0, "pitch {}", cam.pitch);
            assert!(cam.up.y > 0.0);
        }
    }

    #[test]
    fn view_matrix_identity_case() {
        let cam = FlyCamera {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            ..FlyCamera::default()
        };
        assert!(cam.view_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert!(
            cam.view_matrix()
                .abs_diff_eq(Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y), 1e-6)
        );
    }

    #[test]
    fn view_matrix_rotated_case() {
        let mut cam = FlyCamera {
            position: Vec3::new(3.0, 2.0, -4.0),
            ..FlyCamera::default()
        };
        cam.process_mouse_movement(450.0, 200.0);
        let expected = Mat4::look_at_rh(cam.position, cam.position + cam.front, cam.up);
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-6));

        // The eye maps to the view-space origin, the look direction to -Z.
        let eye = cam.view_matrix().transform_point3(cam.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-4));
        let ahead = cam.view_matrix().transform_vector3(cam.front);
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn top_preset_is_exact() {
        let mut cam = FlyCamera::default();
        let yaw = cam.yaw;
        cam.snap_to(ViewPreset::Top);
        assert_eq!(cam.position, Vec3::new(0.0, 30.0, 0.01));
        assert_eq!(cam.up, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(cam.front, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(cam.yaw, yaw);
    }

    #[test]
    fn strafe_works_from_top_preset() {
        let mut cam = FlyCamera::default();
        cam.snap_to(ViewPreset::Top);
        cam.process_keyboard(Movement::Right, 0.1);
        assert!((cam.position.x - 2.0).abs() < 1e-5);
    }
}
