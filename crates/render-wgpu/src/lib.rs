//! wgpu shading stage for the still-life scene.
//!
//! [`GpuRenderer`] implements the texture backend, shading stage, mesh
//! library, and drawer traits, so the scene drives it exactly like the
//! recording stage. Meshes are generated procedurally; textures get a full
//! mip chain on upload.
//!
//! # Invariants
//! - Each draw renders with the shading state current when it was issued.
//! - A draw whose mesh was never loaded is skipped with a warning.
//! - Uniform buffer layouts match `SCENE_SHADER` byte for byte.

mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use gpu::GpuRenderer;
pub use mesh::{Geometry, Section, SectionMap, Vertex};
pub use shaders::SCENE_SHADER;
pub use texture::{GpuTexture, mip_chain, mip_level_count};

pub fn crate_info() -> &'static str {
    "stilllife-render-wgpu v0.1.0"
}
