//! Shared types for the still-life renderer.
//!
//! # Invariants
//! - A [`Transform`] is consumed per draw; nothing here is persisted.
//! - Everything the shading stage accepts is expressed as a [`Uniform`].

mod types;
mod uniform;

pub use types::{MaterialParams, PointLight, Transform};
pub use uniform::{MAX_POINT_LIGHTS, ShadingStage, Uniform};

pub fn crate_info() -> &'static str {
    "stilllife-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
