use crate::AssetError;
use crate::decode::DecodedImage;
use std::path::Path;

/// Texture units available to the scene.
pub const MAX_TEXTURE_UNITS: usize = 16;

/// Where decoded pixels go: GPU memory in the renderer, plain memory in
/// tools and tests.
pub trait TextureBackend {
    type Handle;

    /// Create a 2D texture (repeat wrapping, linear filtering, mipmapped)
    /// from RGB or RGBA pixels.
    fn upload(&mut self, tag: &str, image: &DecodedImage) -> Result<Self::Handle, AssetError>;

    /// Make `handle` the texture sampled from `unit`.
    fn bind(&mut self, unit: u32, handle: &Self::Handle);
}

/// A registered texture. Its unit is its registration index.
#[derive(Debug, Clone)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

/// Tagged textures in registration order.
#[derive(Debug, Clone)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
    capacity: usize,
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::with_capacity(MAX_TEXTURE_UNITS)
    }
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Decode `path` and register it under `tag`. Returns the texture unit.
    pub fn register_texture<B>(
        &mut self,
        backend: &mut B,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<u32, AssetError>
    where
        B: TextureBackend<Handle = H>,
    {
        let path = path.as_ref();
        self.check_free(tag)?;
        let image = DecodedImage::from_file(path)?;
        let unit = self.register_image(backend, &image, tag)?;
        tracing::info!(
            "loaded texture {tag:?} from {}: {}x{}, {} channels, unit {unit}",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        Ok(unit)
    }

    /// Register already-decoded pixels under `tag`. Only 3- and 4-channel
    /// images are accepted; on any error the registry is unchanged.
    pub fn register_image<B>(
        &mut self,
        backend: &mut B,
        image: &DecodedImage,
        tag: &str,
    ) -> Result<u32, AssetError>
    where
        B: TextureBackend<Handle = H>,
    {
        self.check_free(tag)?;
        if !matches!(image.channels, 3 | 4) {
            return Err(AssetError::UnsupportedChannels {
                tag: tag.to_string(),
                channels: image.channels,
            });
        }

        let handle = backend.upload(tag, image)?;
        let unit = self.entries.len() as u32;
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(unit)
    }

    /// Bind every texture to the unit matching its registration index.
    pub fn bind_all<B>(&self, backend: &mut B)
    where
        B: TextureBackend<Handle = H>,
    {
        for (unit, entry) in self.entries.iter().enumerate() {
            backend.bind(unit as u32, &entry.handle);
        }
    }

    pub fn lookup_handle(&self, tag: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    pub fn lookup_unit(&self, tag: &str) -> Option<u32> {
        self.entries
            .iter()
            .position(|entry| entry.tag == tag)
            .map(|index| index as u32)
    }

    pub fn entries(&self) -> &[TextureEntry<H>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_free(&self, tag: &str) -> Result<(), AssetError> {
        if self.lookup_unit(tag).is_some() {
            return Err(AssetError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= self.capacity {
            return Err(AssetError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

/// Texture kept in plain memory by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTexture {
    pub id: usize,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

/// Backend without a GPU. Records uploads and unit bindings.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    uploads: Vec<String>,
    bound: Vec<Option<usize>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags in upload order.
    pub fn uploads(&self) -> &[String] {
        &self.uploads
    }

    /// Texture id bound at `unit`, if any.
    pub fn bound(&self, unit: u32) -> Option<usize> {
        self.bound.get(unit as usize).copied().flatten()
    }
}

impl TextureBackend for MemoryBackend {
    type Handle = MemoryTexture;

    fn upload(&mut self, tag: &str, image: &DecodedImage) -> Result<MemoryTexture, AssetError> {
        let expected = image.width as usize * image.height as usize * image.channels as usize;
        if image.pixels.len() != expected {
            return Err(AssetError::Upload(format!(
                "{tag}: expected {expected} bytes, got {}",
                image.pixels.len()
            )));
        }
        let id = self.uploads.len();
        self.uploads.push(tag.to_string());
        Ok(MemoryTexture {
            id,
            width: image.width,
            height: image.height,
            channels: image.channels,
        })
    }

    fn bind(&mut self, unit: u32, handle: &MemoryTexture) {
        let unit = unit as usize;
        if self.bound.len() <= unit {
            self.bound.resize(unit + 1, None);
        }
        self.bound[unit] = Some(handle.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(channels: u8) -> DecodedImage {
        DecodedImage {
            width: 2,
            height: 2,
            channels,
            pixels: vec![128; 4 * channels as usize],
        }
    }

    fn registry_with(tags: &[&str]) -> (TextureRegistry<MemoryTexture>, MemoryBackend) {
        let mut backend = MemoryBackend::new();
        let mut registry = TextureRegistry::new();
        for tag in tags {
            registry.register_image(&mut backend, &solid(4), tag).unwrap();
        }
        (registry, backend)
    }

    #[test]
    fn units_follow_registration_order() {
        let (registry, _) = registry_with(&["A", "B", "C"]);
        assert_eq!(registry.lookup_unit("A"), Some(0));
        assert_eq!(registry.lookup_unit("B"), Some(1));
        assert_eq!(registry.lookup_unit("C"), Some(2));
    }

    #[test]
    fn unknown_tag_is_none() {
        let (registry, _) = registry_with(&["A"]);
        assert_eq!(registry.lookup_unit("Z"), None);
        assert!(registry.lookup_handle("Z").is_none());
        assert_eq!(registry.lookup_handle("A").map(|h| h.id), Some(0));
    }

    #[test]
    fn five_channels_rejected_without_mutation() {
        let (mut registry, mut backend) = registry_with(&["A"]);
        let err = registry
            .register_image(&mut backend, &solid(5), "five")
            .unwrap_err();
        assert!(matches!(
            err,
            AssetError::UnsupportedChannels { channels: 5, .. }
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(backend.uploads().len(), 1);
        assert_eq!(registry.lookup_unit("five"), None);
    }

    #[test]
    fn rgb_and_rgba_accepted() {
        let mut backend = MemoryBackend::new();
        let mut registry = TextureRegistry::new();
        assert_eq!(registry.register_image(&mut backend, &solid(3), "rgb").unwrap(), 0);
        assert_eq!(registry.register_image(&mut backend, &solid(4), "rgba").unwrap(), 1);
        assert!(registry.register_image(&mut backend, &solid(1), "grey").is_err());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_tag_rejected() {
        let (mut registry, mut backend) = registry_with(&["Floor"]);
        let err = registry
            .register_image(&mut backend, &solid(3), "Floor")
            .unwrap_err();
        assert!(matches!(err, AssetError::DuplicateTag(tag) if tag == "Floor"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut backend = MemoryBackend::new();
        let mut registry = TextureRegistry::with_capacity(2);
        registry.register_image(&mut backend, &solid(4), "a").unwrap();
        registry.register_image(&mut backend, &solid(4), "b").unwrap();
        let err = registry
            .register_image(&mut backend, &solid(4), "c")
            .unwrap_err();
        assert!(matches!(err, AssetError::CapacityExceeded { capacity: 2 }));
    }

    #[test]
    fn upload_failure_leaves_registry_unchanged() {
        let mut backend = MemoryBackend::new();
        let mut registry: TextureRegistry<MemoryTexture> = TextureRegistry::new();
        let short = DecodedImage {
            pixels: vec![0; 3],
            ..solid(4)
        };
        assert!(matches!(
            registry.register_image(&mut backend, &short, "short"),
            Err(AssetError::Upload(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn bind_all_uses_sequential_units() {
        let (registry, mut backend) = registry_with(&["A", "B", "C"]);
        registry.bind_all(&mut backend);
        assert_eq!(backend.bound(0), Some(0));
        assert_eq!(backend.bound(1), Some(1));
        assert_eq!(backend.bound(2), Some(2));
        assert_eq!(backend.bound(3), None);
    }

    #[test]
    fn register_texture_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wood.png");
        RgbImage::from_pixel(4, 2, Rgb([90, 60, 30])).save(&path).unwrap();

        let mut backend = MemoryBackend::new();
        let mut registry = TextureRegistry::new();
        let unit = registry
            .register_texture(&mut backend, &path, "Floor")
            .unwrap();
        assert_eq!(unit, 0);
        let handle = registry.lookup_handle("Floor").unwrap();
        assert_eq!((handle.width, handle.height, handle.channels), (4, 2, 3));
    }

    #[test]
    fn register_texture_missing_file_fails() {
        let mut backend = MemoryBackend::new();
        let mut registry: TextureRegistry<MemoryTexture> = TextureRegistry::new();
        assert!(
            registry
                .register_texture(&mut backend, "/nope/missing.jpg", "Door")
                .is_err()
        );
        assert!(registry.is_empty());
        assert!(backend.uploads().is_empty());
    }
}
