//! Texture and material registries.
//!
//! Textures are decoded from image files, flipped so the first row is the
//! bottom of the picture, and handed to a [`TextureBackend`] for upload.
//! Materials are plain Phong parameter sets. Both registries are keyed by
//! string tags that the scene tables refer to.
//!
//! # Invariants
//! - A texture's unit is its registration index; [`TextureRegistry::bind_all`]
//!   binds index `i` to unit `i`.
//! - Tags are unique within a registry. A failed registration leaves the
//!   registry unchanged.
//! - At most [`MAX_TEXTURE_UNITS`] textures are registered.

mod decode;
mod material;
mod texture;

pub use decode::DecodedImage;
pub use material::{Material, MaterialRegistry};
pub use texture::{
    MAX_TEXTURE_UNITS, MemoryBackend, MemoryTexture, TextureBackend, TextureEntry,
    TextureRegistry,
};

/// Errors from texture and material registration.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture {tag:?} has {channels} channels; only RGB and RGBA are supported")]
    UnsupportedChannels { tag: String, channels: u8 },
    #[error("tag already registered: {0}")]
    DuplicateTag(String),
    #[error("texture registry full ({capacity} units)")]
    CapacityExceeded { capacity: usize },
    #[error("upload failed: {0}")]
    Upload(String),
}

pub fn crate_info() -> &'static str {
    "stilllife-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }

    #[test]
    fn errors_render_tags() {
        let err = AssetError::UnsupportedChannels {
            tag: "Door".into(),
            channels: 2,
        };
        assert!(err.to_string().contains("\"Door\""));
        assert!(err.to_string().contains('2'));
    }
}
