use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Per-draw placement: scale, Euler rotation in degrees, and translation.
///
/// Rotations are applied X first, then Y, then Z, after scaling and before
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: Vec3,
    /// Rotation about the X, Y and Z axes, in degrees.
    pub rotation: Vec3,
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self::new(Vec3::ONE, Vec3::ZERO, Vec3::ZERO);

    pub const fn new(scale: Vec3, rotation: Vec3, position: Vec3) -> Self {
        Self {
            scale,
            rotation,
            position,
        }
    }

    /// Model matrix `translate * rotZ * rotY * rotX * scale`.
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_x(self.rotation.x.to_radians());
        Mat4::from_translation(self.position) * rotation * Mat4::from_scale(self.scale)
    }

    /// Same transform moved by an object-level origin.
    pub fn offset(&self, origin: Vec3) -> Self {
        Self {
            position: self.position + origin,
            ..*self
        }
    }
}

/// Surface response used by the lighting model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            diffuse: Vec3::splat(0.8),
            specular: Vec3::splat(0.2),
            shininess: 16.0,
        }
    }
}

/// Attenuated point light as consumed by the shading stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub active: bool,
}

impl PointLight {
    /// A light slot that contributes nothing.
    pub const OFF: Self = Self {
        position: Vec3::ZERO,
        ambient: Vec3::ZERO,
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
        active: false,
    };

    /// `1 / (constant + linear*d + quadratic*d^2)` at distance `d`.
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::OFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.position, Vec3::ZERO);
        assert!(t.model_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn model_matrix_applies_scale_rotate_translate() {
        let t = Transform::new(
            Vec3::new(2.0, 1.0, 1.0),
            Vec3::new(0.0, 90.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
        );
        let expected = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0))
            * Mat4::from_rotation_y(90.0_f32.to_radians())
            * Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        assert!(t.model_matrix().abs_diff_eq(expected, 1e-5));

        // +X is stretched to length 2, turned onto -Z, then shifted.
        let p = t.model_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 5.0).abs() < 1e-5);
        assert!((p.z + 2.0).abs() < 1e-5);
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let t = Transform::new(Vec3::ONE, Vec3::new(90.0, 0.0, 90.0), Vec3::ZERO);
        // X first sends +Y to +Z; Z about +Z leaves it there.
        let v = t.model_matrix().transform_vector3(Vec3::Y);
        assert!(v.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn offset_moves_position_only() {
        let t = Transform::new(Vec3::splat(2.0), Vec3::new(10.0, 0.0, 0.0), Vec3::ONE);
        let moved = t.offset(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(moved.position, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(moved.scale, t.scale);
        assert_eq!(moved.rotation, t.rotation);
    }

    #[test]
    fn attenuation_falls_off_with_distance() {
        let light = PointLight {
            constant: 1.0,
            linear: 0.1,
            quadratic: 0.03,
            active: true,
            ..PointLight::OFF
        };
        assert_eq!(light.attenuation(0.0), 1.0);
        assert!(light.attenuation(10.0) < light.attenuation(1.0));
    }
}
