use crate::types::{MaterialParams, PointLight};
use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Number of point-light slots the shading stage exposes.
pub const MAX_POINT_LIGHTS: usize = 4;

/// A single named write into the shading stage.
///
/// Uniforms persist in the stage until overwritten, so a draw sees whatever
/// was last written for every name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Uniform {
    View(Mat4),
    Projection(Mat4),
    ViewPosition(Vec3),
    Model(Mat4),
    ObjectColor(Vec4),
    /// Texture unit sampled when `UseTexture(true)`.
    ObjectTexture(u32),
    UseTexture(bool),
    UseLighting(bool),
    UvScale(Vec2),
    Material(MaterialParams),
    PointLight { index: usize, light: PointLight },
}

impl Uniform {
    /// Name of the uniform as the shader program knows it.
    pub fn name(&self) -> &'static str {
        match self {
            Uniform::View(_) => "view",
            Uniform::Projection(_) => "projection",
            Uniform::ViewPosition(_) => "viewPosition",
            Uniform::Model(_) => "model",
            Uniform::ObjectColor(_) => "objectColor",
            Uniform::ObjectTexture(_) => "objectTexture",
            Uniform::UseTexture(_) => "bUseTexture",
            Uniform::UseLighting(_) => "bUseLighting",
            Uniform::UvScale(_) => "UVscale",
            Uniform::Material(_) => "material",
            Uniform::PointLight { .. } => "pointLights",
        }
    }
}

/// The shading-stage collaborator: accepts uniform writes.
pub trait ShadingStage {
    fn set_uniform(&mut self, uniform: Uniform);
}

impl<T: ShadingStage + ?Sized> ShadingStage for &mut T {
    fn set_uniform(&mut self, uniform: Uniform) {
        (**self).set_uniform(uniform);
    }
}

/// Collects writes in order.
impl ShadingStage for Vec<Uniform> {
    fn set_uniform(&mut self, uniform: Uniform) {
        self.push(uniform);
    }
}
