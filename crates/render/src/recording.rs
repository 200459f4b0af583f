use crate::composer::{MeshDrawer, MeshLibrary};
use crate::primitive::{DrawPrimitive, MeshKind};
use crate::state::ShaderState;
use serde::{Deserialize, Serialize};
use std::fmt;
use stilllife_common::{ShadingStage, Uniform};

/// One call received by a [`RecordingStage`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StageEvent {
    Uniform(Uniform),
    Draw(DrawPrimitive),
    LoadMesh(MeshKind),
}

/// Stage that renders nothing and remembers everything.
///
/// Keeps the event log plus a copy of the shading state at every draw,
/// which is what a GPU backend would have seen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingStage {
    events: Vec<StageEvent>,
    #[serde(skip)]
    state: ShaderState,
    #[serde(skip)]
    snapshots: Vec<ShaderState>,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &Uniform> {
        self.events.iter().filter_map(|e| match e {
            StageEvent::Uniform(u) => Some(u),
            _ => None,
        })
    }

    pub fn draws(&self) -> impl Iterator<Item = DrawPrimitive> + '_ {
        self.events.iter().filter_map(|e| match e {
            StageEvent::Draw(p) => Some(*p),
            _ => None,
        })
    }

    pub fn loaded_meshes(&self) -> impl Iterator<Item = MeshKind> + '_ {
        self.events.iter().filter_map(|e| match e {
            StageEvent::LoadMesh(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn draw_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Current shading state.
    pub fn state(&self) -> &ShaderState {
        &self.state
    }

    /// Shading state as it was when draw number `index` was issued.
    pub fn state_at_draw(&self, index: usize) -> Option<&ShaderState> {
        self.snapshots.get(index)
    }

    /// Forget recorded frames but keep the shading state.
    pub fn clear(&mut self) {
        self.events.clear();
        self.snapshots.clear();
    }
}

impl ShadingStage for RecordingStage {
    fn set_uniform(&mut self, uniform: Uniform) {
        self.state.apply(uniform);
        self.events.push(StageEvent::Uniform(uniform));
    }
}

impl MeshDrawer for RecordingStage {
    fn draw(&mut self, primitive: DrawPrimitive) {
        self.snapshots.push(self.state);
        self.events.push(StageEvent::Draw(primitive));
    }
}

impl MeshLibrary for RecordingStage {
    fn load_mesh(&mut self, kind: MeshKind) {
        self.events.push(StageEvent::LoadMesh(kind));
    }
}

impl fmt::Display for RecordingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Recorded frame ({} events, {} draws) ===",
            self.events.len(),
            self.draw_count()
        )?;
        let mut draw = 0;
        for event in &self.events {
            match event {
                StageEvent::LoadMesh(kind) => writeln!(f, "load {kind:?}")?,
                StageEvent::Draw(primitive) => {
                    writeln!(f, "  draw #{draw}: {primitive}")?;
                    draw += 1;
                }
                StageEvent::Uniform(uniform) => {
                    write!(f, "  {} = ", uniform.name())?;
                    write_value(f, uniform)?;
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, uniform: &Uniform) -> fmt::Result {
    match uniform {
        Uniform::View(m) | Uniform::Projection(m) => {
            let c = m.to_cols_array();
            write!(f, "[{:.3}, {:.3}, {:.3}, {:.3} ...]", c[0], c[1], c[2], c[3])
        }
        Uniform::Model(m) => {
            let (scale, _, translation) = m.to_scale_rotation_translation();
            write!(
                f,
                "at ({:.3}, {:.3}, {:.3}) scale ({:.3}, {:.3}, {:.3})",
                translation.x, translation.y, translation.z, scale.x, scale.y, scale.z
            )
        }
        Uniform::ViewPosition(p) => write!(f, "({:.3}, {:.3}, {:.3})", p.x, p.y, p.z),
        Uniform::ObjectColor(c) => {
            write!(f, "rgba({:.2}, {:.2}, {:.2}, {:.2})", c.x, c.y, c.z, c.w)
        }
        Uniform::ObjectTexture(unit) => write!(f, "unit {unit}"),
        Uniform::UseTexture(on) | Uniform::UseLighting(on) => write!(f, "{on}"),
        Uniform::UvScale(uv) => write!(f, "({}, {})", uv.x, uv.y),
        Uniform::Material(m) => write!(
            f,
            "diffuse ({:.2}, {:.2}, {:.2}) specular ({:.2}, {:.2}, {:.2}) shininess {}",
            m.diffuse.x,
            m.diffuse.y,
            m.diffuse.z,
            m.specular.x,
            m.specular.y,
            m.specular.z,
            m.shininess
        ),
        Uniform::PointLight { index, light } => write!(
            f,
            "[{index}] at ({:.1}, {:.1}, {:.1}) active={}",
            light.position.x, light.position.y, light.position.z, light.active
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Caps;
    use glam::{Mat4, Vec3, Vec4};

    #[test]
    fn snapshots_follow_draws() {
        let mut stage = RecordingStage::new();
        stage.set_uniform(Uniform::ObjectColor(Vec4::new(1.0, 0.0, 0.0, 1.0)));
        stage.draw(DrawPrimitive::Sphere);
        stage.set_uniform(Uniform::ObjectColor(Vec4::new(0.0, 0.0, 1.0, 1.0)));
        stage.draw(DrawPrimitive::HalfSphere);

        assert_eq!(stage.draw_count(), 2);
        assert_eq!(stage.state_at_draw(0).unwrap().object_color.x, 1.0);
        assert_eq!(stage.state_at_draw(1).unwrap().object_color.z, 1.0);
        assert!(stage.state_at_draw(2).is_none());
        assert_eq!(
            stage.draws().collect::<Vec<_>>(),
            [DrawPrimitive::Sphere, DrawPrimitive::HalfSphere]
        );
    }

    #[test]
    fn clear_keeps_state() {
        let mut stage = RecordingStage::new();
        stage.load_mesh(MeshKind::Plane);
        stage.set_uniform(Uniform::UseLighting(true));
        stage.draw(DrawPrimitive::Plane);
        stage.clear();

        assert!(stage.events().is_empty());
        assert_eq!(stage.draw_count(), 0);
        assert!(stage.state().use_lighting);
    }

    #[test]
    fn text_dump_lists_draws() {
        let mut stage = RecordingStage::new();
        stage.load_mesh(MeshKind::Cylinder);
        stage.set_uniform(Uniform::Model(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))));
        stage.draw(DrawPrimitive::Cylinder(Caps::SIDES));

        let text = stage.to_string();
        assert!(text.contains("1 draws"));
        assert!(text.contains("load Cylinder"));
        assert!(text.contains("model = at (1.000, 2.000, 3.000)"));
        assert!(text.contains("draw #0: cylinder (top=false, bottom=false, sides=true)"));
    }

    #[test]
    fn events_serialize_to_json() {
        let mut stage = RecordingStage::new();
        stage.set_uniform(Uniform::UseTexture(true));
        stage.draw(DrawPrimitive::Torus);

        let json = serde_json::to_string(&stage).unwrap();
        assert!(json.contains("UseTexture"));
        assert!(json.contains("Torus"));

        let back: RecordingStage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events(), stage.events());
    }
}
