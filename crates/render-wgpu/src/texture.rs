use image::imageops::FilterType;
use image::RgbaImage;
use stilllife_assets::{AssetError, DecodedImage};

/// A sampled 2D texture with its bind group (group 1 of the scene shader).
pub struct GpuTexture {
    pub tag: String,
    pub width: u32,
    pub height: u32,
    pub mip_level_count: u32,
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// RGBA8 pixels for every mip level, largest first.
pub fn mip_chain(image: &DecodedImage, tag: &str) -> Result<Vec<RgbaImage>, AssetError> {
    let rgba = image
        .to_rgba8()
        .ok_or_else(|| AssetError::UnsupportedChannels {
            tag: tag.to_string(),
            channels: image.channels,
        })?;
    let base = RgbaImage::from_raw(image.width, image.height, rgba).ok_or_else(|| {
        AssetError::Upload(format!(
            "{tag}: pixel buffer does not match {}x{}",
            image.width, image.height
        ))
    })?;

    let levels = mip_level_count(image.width, image.height);
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base);
    for level in 1..levels {
        let w = (image.width >> level).max(1);
        let h = (image.height >> level).max(1);
        let next = image::imageops::resize(&chain[chain.len() - 1], w, h, FilterType::Triangle);
        chain.push(next);
    }
    Ok(chain)
}

/// Repeat-wrapped, linearly filtered, mipmapped sampler.
pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("texture_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("texture_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Upload `levels` (largest first) as one texture and build its bind group.
pub fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    tag: &str,
    levels: &[RgbaImage],
) -> Result<GpuTexture, AssetError> {
    let base = levels
        .first()
        .ok_or_else(|| AssetError::Upload(format!("{tag}: no pixel data")))?;
    let (width, height) = base.dimensions();
    let limit = device.limits().max_texture_dimension_2d;
    if width > limit || height > limit {
        return Err(AssetError::Upload(format!(
            "{tag}: {width}x{height} exceeds the device limit of {limit}"
        )));
    }
    Ok(create(device, queue, layout, sampler, tag, base, levels))
}

/// A 1x1 texture of one colour, sampled when no real texture is bound.
pub fn solid(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    rgba: [u8; 4],
) -> GpuTexture {
    let pixel = RgbaImage::from_pixel(1, 1, image::Rgba(rgba));
    create(device, queue, layout, sampler, "solid", &pixel, std::slice::from_ref(&pixel))
}

fn create(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    tag: &str,
    base: &RgbaImage,
    levels: &[RgbaImage],
) -> GpuTexture {
    let (width, height) = base.dimensions();
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(tag),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels.len() as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (level, pixels) in levels.iter().enumerate() {
        let (w, h) = pixels.dimensions();
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: level as u32,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(tag),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    GpuTexture {
        tag: tag.to_string(),
        width,
        height,
        mip_level_count: levels.len() as u32,
        _texture: texture,
        bind_group,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(width: u32, height: u32) -> DecodedImage {
        DecodedImage {
            width,
            height,
            channels: 3,
            pixels: vec![100; (width * height * 3) as usize],
        }
    }

    #[test]
    fn level_counts() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 64), 9);
        assert_eq!(mip_level_count(300, 200), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn chain_halves_down_to_one() {
        let chain = mip_chain(&rgb(8, 2), "Floor").unwrap();
        let sizes: Vec<_> = chain.iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, [(8, 2), (4, 1), (2, 1), (1, 1)]);
        // RGB gets an opaque alpha channel.
        assert_eq!(chain[0].get_pixel(0, 0).0, [100, 100, 100, 255]);
    }

    #[test]
    fn chain_rejects_unsupported_layout() {
        let grey = DecodedImage {
            channels: 2,
            pixels: vec![0; 8],
            ..rgb(2, 2)
        };
        assert!(matches!(
            mip_chain(&grey, "Jam"),
            Err(AssetError::UnsupportedChannels { channels: 2, .. })
        ));
    }

    #[test]
    fn bottom_edge_samples_bottom_row() {
        // Top row red, bottom row blue.
        let source = image::RgbImage::from_fn(1, 2, |_, y| {
            image::Rgb(if y == 0 { [255, 0, 0] } else { [0, 0, 255] })
        });
        let mut bytes = std::io::Cursor::new(Vec::new());
        source.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let decoded = DecodedImage::from_bytes(bytes.get_ref()).unwrap();
        let chain = mip_chain(&decoded, "Napkin").unwrap();
        // Texel row 0 is what v = 0 samples; mesh bottom edges carry v = 0.
        assert_eq!(chain[0].get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(chain[0].get_pixel(0, 1).0, [255, 0, 0, 255]);

        let cylinder = crate::Geometry::build(stilllife_render::MeshKind::Cylinder);
        assert!(
            cylinder
                .vertices
                .iter()
                .filter(|v| v.position[1] == 0.0 && v.normal[1] == 0.0)
                .all(|v| v.uv[1] == 0.0)
        );
        assert!(!crate::SCENE_SHADER.contains("1.0 - in.uv.y"));
    }

    #[test]
    fn chain_rejects_short_buffer() {
        let short = DecodedImage {
            pixels: vec![0; 5],
            ..rgb(2, 2)
        };
        assert!(matches!(mip_chain(&short, "Door"), Err(AssetError::Upload(_))));
    }
}
