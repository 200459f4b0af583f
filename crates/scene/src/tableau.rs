use crate::manifest::{LIGHTS, MATERIALS, REQUIRED_MESHES, TEXTURES};
use crate::objects::{TABLEAU, placement};
use std::path::Path;
use stilllife_assets::{AssetError, MaterialRegistry, TextureBackend, TextureRegistry};
use stilllife_common::{ShadingStage, Uniform};
use stilllife_render::{Composer, MeshDrawer, MeshLibrary};

/// A texture that could not be loaded, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTexture {
    pub tag: &'static str,
    pub reason: String,
}

/// The still-life scene: registries, light rig, and the draw list.
///
/// Load phase first ([`prepare`](Self::prepare), or its steps one by one),
/// then [`render`](Self::render) every frame. Registries are read-only once
/// rendering starts.
#[derive(Debug)]
pub struct Tableau<H> {
    textures: TextureRegistry<H>,
    materials: MaterialRegistry,
    composer: Composer,
    failed: Vec<FailedTexture>,
}

impl<H> Default for Tableau<H> {
    fn default() -> Self {
        Self {
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            composer: Composer::new(),
            failed: Vec::new(),
        }
    }
}

impl<H> Tableau<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the whole load phase against separate texture and stage targets.
    pub fn prepare<B, S>(
        &mut self,
        texture_dir: &Path,
        backend: &mut B,
        stage: &mut S,
    ) -> Result<(), AssetError>
    where
        B: TextureBackend<Handle = H>,
        S: ShadingStage + MeshLibrary + ?Sized,
    {
        self.load_textures(texture_dir, backend);
        self.define_materials()?;
        self.setup_lights(stage);
        self.load_meshes(stage);
        Ok(())
    }

    /// Load every manifest texture from `dir` and bind them all.
    ///
    /// A texture that fails is logged and skipped; the rest still load.
    /// Returns the number loaded.
    pub fn load_textures<B>(&mut self, dir: &Path, backend: &mut B) -> usize
    where
        B: TextureBackend<Handle = H>,
    {
        for spec in &TEXTURES {
            let path = dir.join(spec.file);
            if let Err(e) = self.textures.register_texture(backend, &path, spec.tag) {
                tracing::error!("could not load texture {} ({}): {e}", spec.tag, path.display());
                self.failed.push(FailedTexture {
                    tag: spec.tag,
                    reason: e.to_string(),
                });
            }
        }
        self.textures.bind_all(backend);
        tracing::info!(
            "{} of {} textures loaded",
            self.textures.len(),
            TEXTURES.len()
        );
        self.textures.len()
    }

    pub fn define_materials(&mut self) -> Result<(), AssetError> {
        for spec in &MATERIALS {
            self.materials
                .register_material(spec.tag, spec.diffuse, spec.specular, spec.shininess)?;
        }
        Ok(())
    }

    /// Turn lighting on and configure the light slots.
    pub fn setup_lights<S: ShadingStage + ?Sized>(&self, stage: &mut S) {
        stage.set_uniform(Uniform::UseLighting(true));
        for (index, light) in LIGHTS.iter().enumerate() {
            stage.set_uniform(Uniform::PointLight {
                index,
                light: *light,
            });
        }
    }

    pub fn load_meshes<M: MeshLibrary + ?Sized>(&self, meshes: &mut M) {
        for kind in REQUIRED_MESHES {
            meshes.load_mesh(kind);
        }
    }

    /// Draw every object in order. Returns the number of draw calls.
    pub fn render<T>(&mut self, target: &mut T) -> usize
    where
        T: ShadingStage + MeshDrawer + ?Sized,
    {
        self.composer
            .render(target, &self.textures, &self.materials, &TABLEAU)
    }

    /// Draw one placed object by name. `None` if no object has that name.
    pub fn render_object<T>(&mut self, target: &mut T, name: &str) -> Option<usize>
    where
        T: ShadingStage + MeshDrawer + ?Sized,
    {
        let placed = placement(name)?;
        Some(self.composer.draw_object(
            target,
            &self.textures,
            &self.materials,
            placed.object,
            placed.origin,
        ))
    }

    pub fn textures(&self) -> &TextureRegistry<H> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn failed_textures(&self) -> &[FailedTexture] {
        &self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use stilllife_assets::{MemoryBackend, MemoryTexture};
    use stilllife_render::{DrawPrimitive, RecordingStage, StageEvent};

    fn texture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for spec in &TEXTURES {
            let path = dir.path().join(spec.file);
            if spec.file.ends_with(".png") {
                RgbaImage::from_pixel(2, 2, Rgba([200, 10, 10, 255]))
                    .save(&path)
                    .unwrap();
            } else {
                RgbImage::from_pixel(2, 2, Rgb([10, 200, 10]))
                    .save(&path)
                    .unwrap();
            }
        }
        dir
    }

    fn prepared(dir: &Path) -> (Tableau<MemoryTexture>, MemoryBackend, RecordingStage) {
        let mut tableau = Tableau::new();
        let mut backend = MemoryBackend::new();
        let mut stage = RecordingStage::new();
        tableau.prepare(dir, &mut backend, &mut stage).unwrap();
        (tableau, backend, stage)
    }

    #[test]
    fn prepare_loads_everything() {
        let dir = texture_dir();
        let (tableau, backend, stage) = prepared(dir.path());

        assert_eq!(tableau.textures().len(), 13);
        assert!(tableau.failed_textures().is_empty());
        assert_eq!(tableau.textures().lookup_unit("Floor"), Some(0));
        assert_eq!(tableau.textures().lookup_unit("Nutrition_facts"), Some(12));
        assert_eq!(backend.bound(12), Some(12));
        assert_eq!(tableau.materials().len(), 6);

        assert!(stage.state().use_lighting);
        assert_eq!(stage.state().active_lights(), 2);
        assert_eq!(stage.state().lights[0].position, Vec3::new(0.0, 70.0, 0.0));
        assert_eq!(
            stage.loaded_meshes().collect::<Vec<_>>(),
            REQUIRED_MESHES.to_vec()
        );
    }

    #[test]
    fn missing_files_are_reported_not_fatal() {
        let dir = texture_dir();
        std::fs::remove_file(dir.path().join("Door.png")).unwrap();
        std::fs::write(dir.path().join("Wall_texture.jpg"), b"not a jpeg").unwrap();

        let (mut tableau, _, mut stage) = prepared(dir.path());
        let failed: Vec<_> = tableau.failed_textures().iter().map(|f| f.tag).collect();
        assert_eq!(failed, ["Door", "Wall"]);
        assert_eq!(tableau.textures().len(), 11);
        // Units stay contiguous: Trim1 moves down past the missing Door.
        assert_eq!(tableau.textures().lookup_unit("Trim1"), Some(6));

        stage.clear();
        let draws = tableau.render(&mut stage);
        assert_eq!(draws, 36);
        // Door panel draws untextured.
        assert!(!stage.state_at_draw(1).unwrap().use_texture);
    }

    #[test]
    fn full_frame_draw_sequence() {
        let dir = texture_dir();
        let (mut tableau, _, mut stage) = prepared(dir.path());
        stage.clear();

        assert_eq!(tableau.render(&mut stage), 36);
        assert_eq!(stage.draw_count(), 36);

        let draws: Vec<_> = stage.draws().collect();
        assert_eq!(draws[0], DrawPrimitive::Plane);
        // Pacifier starts after the eight background planes.
        assert_eq!(draws[8], DrawPrimitive::HalfTorus);
        assert!(
            stage
                .events()
                .iter()
                .all(|e| !matches!(e, StageEvent::LoadMesh(_)))
        );
        for draw in &draws {
            assert!(REQUIRED_MESHES.contains(&draw.mesh()));
        }
        // The lotion shoulder is the translucent last draw.
        assert_eq!(stage.state_at_draw(35).unwrap().object_color.w, 0.30);
    }

    #[test]
    fn floor_state_at_first_draw() {
        let dir = texture_dir();
        let (mut tableau, _, mut stage) = prepared(dir.path());
        tableau.render(&mut stage);

        let floor = stage.state_at_draw(0).unwrap();
        assert!(floor.use_texture);
        assert_eq!(floor.object_texture, 0);
        assert_eq!(floor.uv_scale, glam::Vec2::splat(0.3));
        assert_eq!(floor.material.shininess, 2.0);
        let centre = floor.model.transform_point3(Vec3::ZERO);
        assert!(centre.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-6));
    }

    #[test]
    fn cup_inherits_previous_material() {
        let dir = texture_dir();
        let (mut tableau, _, mut stage) = prepared(dir.path());
        tableau.render(&mut stage);

        // background 8 + pacifier 5: the cup body is draw 13.
        let cup = stage.state_at_draw(13).unwrap();
        assert_eq!(cup.material.shininess, 32.0);
        let base = cup.model.transform_point3(Vec3::ZERO);
        assert!(base.abs_diff_eq(Vec3::new(-9.0, 0.005, -7.0), 1e-5));
    }

    #[test]
    fn render_object_by_name() {
        let dir = texture_dir();
        let (mut tableau, _, mut stage) = prepared(dir.path());
        stage.clear();

        assert_eq!(tableau.render_object(&mut stage, "jam"), Some(9));
        let sides = stage
            .draws()
            .filter(|d| matches!(d, DrawPrimitive::BoxSide(_)))
            .count();
        assert_eq!(sides, 4);
        assert_eq!(tableau.render_object(&mut stage, "teapot"), None);
    }
}
