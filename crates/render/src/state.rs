use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use stilllife_common::{MAX_POINT_LIGHTS, MaterialParams, PointLight, Uniform};

/// Every uniform the shader program reads, as last written.
///
/// Backends fold writes into this and take a copy at each draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaderState {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_position: Vec3,
    pub model: Mat4,
    pub object_color: Vec4,
    pub object_texture: u32,
    pub use_texture: bool,
    pub use_lighting: bool,
    pub uv_scale: Vec2,
    pub material: MaterialParams,
    pub lights: [PointLight; MAX_POINT_LIGHTS],
}

impl Default for ShaderState {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_position: Vec3::ZERO,
            model: Mat4::IDENTITY,
            object_color: Vec4::ONE,
            object_texture: 0,
            use_texture: false,
            use_lighting: false,
            uv_scale: Vec2::ONE,
            material: MaterialParams::default(),
            lights: [PointLight::OFF; MAX_POINT_LIGHTS],
        }
    }
}

impl ShaderState {
    pub fn apply(&mut self, uniform: Uniform) {
        match uniform {
            Uniform::View(m) => self.view = m,
            Uniform::Projection(m) => self.projection = m,
            Uniform::ViewPosition(p) => self.view_position = p,
            Uniform::Model(m) => self.model = m,
            Uniform::ObjectColor(c) => self.object_color = c,
            Uniform::ObjectTexture(unit) => self.object_texture = unit,
            Uniform::UseTexture(on) => self.use_texture = on,
            Uniform::UseLighting(on) => self.use_lighting = on,
            Uniform::UvScale(uv) => self.uv_scale = uv,
            Uniform::Material(params) => self.material = params,
            Uniform::PointLight { index, light } => match self.lights.get_mut(index) {
                Some(slot) => *slot = light,
                None => tracing::warn!("point light index {index} out of range"),
            },
        }
    }

    pub fn active_lights(&self) -> usize {
        self.lights.iter().filter(|l| l.active).count()
    }
}
