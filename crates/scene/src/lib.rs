//! The still-life tableau as data.
//!
//! Texture manifest, material table, light rig, and every composite object
//! are constant tables. [`Tableau`] loads them into registries and renders
//! the objects through the composer.
//!
//! # Invariants
//! - Texture units follow manifest order, skipping textures that failed.
//! - Objects are drawn in [`TABLEAU`] order, parts in authored order.
//! - Every texture and material tag used by an object is defined in the
//!   manifest tables.

mod manifest;
pub mod objects;
mod tableau;

pub use manifest::{LIGHTS, MATERIALS, MaterialSpec, REQUIRED_MESHES, TEXTURES, TextureSpec};
pub use objects::{TABLEAU, placement};
pub use tableau::{FailedTexture, Tableau};

/// Default texture directory, relative to the working directory.
pub const DEFAULT_TEXTURE_DIR: &str = "textures";

pub fn crate_info() -> &'static str {
    "stilllife-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use stilllife_render::MeshKind;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }

    #[test]
    fn object_tags_are_defined() {
        for placed in &TABLEAU {
            for tag in placed.object.texture_tags() {
                assert!(
                    TEXTURES.iter().any(|t| t.tag == tag),
                    "{}: unknown texture {tag}",
                    placed.object.name
                );
            }
            for tag in placed.object.material_tags() {
                assert!(
                    MATERIALS.iter().any(|m| m.tag == tag),
                    "{}: unknown material {tag}",
                    placed.object.name
                );
            }
            for part in placed.object.parts {
                assert!(REQUIRED_MESHES.contains(&part.primitive.mesh()));
            }
        }
    }

    #[test]
    fn manifest_tags_are_unique() {
        for (i, a) in TEXTURES.iter().enumerate() {
            assert!(TEXTURES[i + 1..].iter().all(|b| b.tag != a.tag));
        }
        for (i, a) in MATERIALS.iter().enumerate() {
            assert!(MATERIALS[i + 1..].iter().all(|b| b.tag != a.tag));
        }
        assert_eq!(TEXTURES.len(), 13);
        assert_eq!(REQUIRED_MESHES.len(), MeshKind::ALL.len());
    }

    #[test]
    fn tableau_order_and_origins() {
        let names: Vec<_> = TABLEAU.iter().map(|p| p.object.name).collect();
        assert_eq!(names, ["background", "pacifier", "cup", "bottle", "jam", "lotion"]);
        assert_eq!(placement("jam").unwrap().origin, glam::Vec3::new(9.0, 0.001, -4.0));
        let parts: usize = TABLEAU.iter().map(|p| p.object.parts.len()).sum();
        assert_eq!(parts, 36);
    }
}
