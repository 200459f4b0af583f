//! Renderer-agnostic draw vocabulary and the draw-list composer.
//!
//! Composite objects are data: ordered [`Part`]s naming a transform, a
//! surface, an optional material, and one [`DrawPrimitive`]. The
//! [`Composer`] turns them into uniform writes and draw calls on any target
//! implementing [`ShadingStage`](stilllife_common::ShadingStage) and
//! [`MeshDrawer`].
//!
//! # Invariants
//! - Every part produces exactly one draw call, after its state writes.
//! - Surface writes are exclusive: a colour clears `bUseTexture`, a texture
//!   sets it.
//! - Shading state persists between parts; nothing is reset implicitly.
//! - The composer never mutates the texture or material registries.

mod composer;
mod part;
mod primitive;
mod recording;
mod state;

pub use composer::{Composer, MeshDrawer, MeshLibrary};
pub use part::{Part, Placement, SceneObject, Surface};
pub use primitive::{BoxSide, Caps, DrawPrimitive, MeshKind};
pub use recording::{RecordingStage, StageEvent};
pub use state::ShaderState;

pub fn crate_info() -> &'static str {
    "stilllife-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
