use crate::primitive::DrawPrimitive;
use glam::{Vec2, Vec3, Vec4};
use serde::Serialize;
use stilllife_common::Transform;

/// What a part looks like: a flat colour or a scaled texture, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Surface {
    Color(Vec4),
    Texture { tag: &'static str, uv_scale: Vec2 },
}

impl Surface {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Surface::Color(Vec4::new(r, g, b, a))
    }

    pub const fn texture(tag: &'static str, u: f32, v: f32) -> Self {
        Surface::Texture {
            tag,
            uv_scale: Vec2::new(u, v),
        }
    }

    pub fn texture_tag(&self) -> Option<&'static str> {
        match self {
            Surface::Texture { tag, .. } => Some(tag),
            Surface::Color(_) => None,
        }
    }
}

/// One step of a composite object: place, shade, draw.
///
/// `material` is optional; without one the previously published material
/// stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Part {
    pub transform: Transform,
    pub surface: Surface,
    pub material: Option<&'static str>,
    pub primitive: DrawPrimitive,
}

/// A named, ordered list of parts authored around a local origin.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SceneObject {
    pub name: &'static str,
    pub parts: &'static [Part],
}

impl SceneObject {
    /// Texture tags referenced by this object, in part order, with repeats.
    pub fn texture_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parts.iter().filter_map(|p| p.surface.texture_tag())
    }

    pub fn material_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parts.iter().filter_map(|p| p.material)
    }
}

/// A scene object drawn with every part shifted by `origin`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Placement {
    pub object: &'static SceneObject,
    pub origin: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Caps;

    static PARTS: [Part; 2] = [
        Part {
            transform: Transform::IDENTITY,
            surface: Surface::texture("Wall", 1.0, 0.5),
            material: Some("floor_material"),
            primitive: DrawPrimitive::Plane,
        },
        Part {
            transform: Transform::IDENTITY,
            surface: Surface::rgba(0.0, 0.0, 0.0, 1.0),
            material: None,
            primitive: DrawPrimitive::Cylinder(Caps::SIDES),
        },
    ];

    #[test]
    fn object_lists_referenced_tags() {
        let obj = SceneObject {
            name: "wall",
            parts: &PARTS,
        };
        assert_eq!(obj.texture_tags().collect::<Vec<_>>(), ["Wall"]);
        assert_eq!(obj.material_tags().collect::<Vec<_>>(), ["floor_material"]);
    }

    #[test]
    fn surface_constructors() {
        assert_eq!(
            Surface::rgba(0.1, 0.2, 0.3, 0.4),
            Surface::Color(Vec4::new(0.1, 0.2, 0.3, 0.4))
        );
        assert_eq!(Surface::texture("Jam", -1.0, 1.0).texture_tag(), Some("Jam"));
        assert_eq!(Surface::rgba(1.0, 1.0, 1.0, 1.0).texture_tag(), None);
    }
}
