use crate::AssetError;
use image::DynamicImage;
use std::path::Path;

/// Pixel data ready for upload, tightly packed, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Read and decode an image file, flipping it vertically so the first
    /// row is the bottom of the picture.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Decode an in-memory image file (format guessed from its header).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(image.flipv()))
    }

    /// Keep the source channel count; anything other than 3 or 4 is left for
    /// the registry to reject.
    fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let channels = image.color().channel_count();
        let pixels = match channels {
            1 => image.into_luma8().into_raw(),
            2 => image.into_luma_alpha8().into_raw(),
            3 => image.into_rgb8().into_raw(),
            _ => image.into_rgba8().into_raw(),
        };
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// RGBA8 copy of the pixels. RGB gets an opaque alpha channel; other
    /// layouts return `None`.
    pub fn to_rgba8(&self) -> Option<Vec<u8>> {
        match self.channels {
            4 => Some(self.pixels.clone()),
            3 => Some(
                self.pixels
                    .chunks_exact(3)
                    .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                    .collect(),
            ),
            _ => None,
        }
    }
}
