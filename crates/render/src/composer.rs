use crate::part::{Part, Placement, SceneObject, Surface};
use crate::primitive::{DrawPrimitive, MeshKind};
use glam::Vec3;
use std::collections::HashSet;
use stilllife_assets::{MaterialRegistry, TextureRegistry};
use stilllife_common::{ShadingStage, Uniform};

/// Loads primitive geometry ahead of drawing.
pub trait MeshLibrary {
    fn load_mesh(&mut self, kind: MeshKind);
}

/// Issues one draw call with whatever shading state is current.
pub trait MeshDrawer {
    fn draw(&mut self, primitive: DrawPrimitive);
}

impl<T: MeshLibrary + ?Sized> MeshLibrary for &mut T {
    fn load_mesh(&mut self, kind: MeshKind) {
        (**self).load_mesh(kind);
    }
}

impl<T: MeshDrawer + ?Sized> MeshDrawer for &mut T {
    fn draw(&mut self, primitive: DrawPrimitive) {
        (**self).draw(primitive);
    }
}

/// Executes draw lists against a stage.
///
/// For each part, in order: model matrix, surface (colour or texture),
/// material if one is named, then exactly one draw. Tags that miss their
/// registry are logged at `warn` the first time and at `debug` after.
#[derive(Debug, Default)]
pub struct Composer {
    missing: HashSet<&'static str>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every placement in order. Returns the number of draw calls.
    pub fn render<T, H>(
        &mut self,
        target: &mut T,
        textures: &TextureRegistry<H>,
        materials: &MaterialRegistry,
        placements: &[Placement],
    ) -> usize
    where
        T: ShadingStage + MeshDrawer + ?Sized,
    {
        placements
            .iter()
            .map(|p| self.draw_object(target, textures, materials, p.object, p.origin))
            .sum()
    }

    pub fn draw_object<T, H>(
        &mut self,
        target: &mut T,
        textures: &TextureRegistry<H>,
        materials: &MaterialRegistry,
        object: &SceneObject,
        origin: Vec3,
    ) -> usize
    where
        T: ShadingStage + MeshDrawer + ?Sized,
    {
        for part in object.parts {
            self.draw_part(target, textures, materials, part, origin);
        }
        object.parts.len()
    }

    pub fn draw_part<T, H>(
        &mut self,
        target: &mut T,
        textures: &TextureRegistry<H>,
        materials: &MaterialRegistry,
        part: &Part,
        origin: Vec3,
    ) where
        T: ShadingStage + MeshDrawer + ?Sized,
    {
        let model = part.transform.offset(origin).model_matrix();
        target.set_uniform(Uniform::Model(model));

        match part.surface {
            Surface::Color(color) => {
                target.set_uniform(Uniform::UseTexture(false));
                target.set_uniform(Uniform::ObjectColor(color));
            }
            Surface::Texture { tag, uv_scale } => {
                target.set_uniform(Uniform::UvScale(uv_scale));
                match textures.lookup_unit(tag) {
                    Some(unit) => {
                        target.set_uniform(Uniform::UseTexture(true));
                        target.set_uniform(Uniform::ObjectTexture(unit));
                    }
                    None => {
                        self.report_missing("texture", tag);
                        target.set_uniform(Uniform::UseTexture(false));
                    }
                }
            }
        }

        if let Some(tag) = part.material {
            match materials.find_material(tag) {
                Some(material) => target.set_uniform(Uniform::Material(material.params)),
                None => self.report_missing("material", tag),
            }
        }

        target.draw(part.primitive);
    }

    fn report_missing(&mut self, kind: &str, tag: &'static str) {
        if self.missing.insert(tag) {
            tracing::warn!("{kind} {tag:?} is not registered; drawing without it");
        } else {
            tracing::debug!("{kind} {tag:?} still missing");
        }
    }
}
