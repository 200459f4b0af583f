use crate::mesh::{Geometry, SectionMap, Vertex};
use crate::shaders;
use crate::texture::{self, GpuTexture};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::collections::HashMap;
use std::num::NonZeroU64;
use std::ops::Range;
use std::sync::Arc;
use stilllife_assets::{AssetError, DecodedImage, TextureBackend};
use stilllife_common::{MAX_POINT_LIGHTS, PointLight, ShadingStage, Uniform};
use stilllife_render::{DrawPrimitive, MeshDrawer, MeshKind, MeshLibrary, ShaderState};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.15,
    a: 1.0,
};
const INITIAL_OBJECT_SLOTS: u64 = 64;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightUniform {
    position: [f32; 3],
    constant: f32,
    ambient: [f32; 3],
    linear: f32,
    diffuse: [f32; 3],
    quadratic: f32,
    specular: [f32; 3],
    active: u32,
}

impl From<&PointLight> for LightUniform {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.to_array(),
            constant: light.constant,
            ambient: light.ambient.to_array(),
            linear: light.linear,
            diffuse: light.diffuse.to_array(),
            quadratic: light.quadratic,
            specular: light.specular.to_array(),
            active: light.active as u32,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    view_position: [f32; 3],
    _pad: f32,
    lights: [LightUniform; MAX_POINT_LIGHTS],
}

impl From<&ShaderState> for FrameUniforms {
    fn from(state: &ShaderState) -> Self {
        Self {
            view: state.view.to_cols_array_2d(),
            projection: state.projection.to_cols_array_2d(),
            view_position: state.view_position.to_array(),
            _pad: 0.0,
            lights: state.lights.each_ref().map(LightUniform::from),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    uv_scale: [f32; 2],
    use_texture: u32,
    use_lighting: u32,
    diffuse: [f32; 3],
    shininess: f32,
    specular: [f32; 3],
    _pad: f32,
}

impl From<&ShaderState> for ObjectUniforms {
    fn from(state: &ShaderState) -> Self {
        Self {
            model: state.model.to_cols_array_2d(),
            normal_matrix: normal_matrix(state.model).to_cols_array_2d(),
            color: state.object_color.to_array(),
            uv_scale: state.uv_scale.to_array(),
            use_texture: state.use_texture as u32,
            use_lighting: state.use_lighting as u32,
            diffuse: state.material.diffuse.to_array(),
            shininess: state.material.shininess,
            specular: state.material.specular.to_array(),
            _pad: 0.0,
        }
    }
}

const OBJECT_SIZE: u64 = std::mem::size_of::<ObjectUniforms>() as u64;

fn normal_matrix(model: Mat4) -> Mat4 {
    if model.determinant().abs() <= f32::EPSILON {
        return Mat4::IDENTITY;
    }
    model.inverse().transpose()
}

fn align_to(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    sections: SectionMap,
}

/// One recorded draw: the shading state it saw, the texture it samples,
/// and the index ranges it covers.
struct PendingDraw {
    object: ObjectUniforms,
    texture: Option<Arc<GpuTexture>>,
    mesh: MeshKind,
    ranges: Vec<Range<u32>>,
}

/// wgpu shading stage for the still-life scene.
///
/// Owns the device and queue. Uniform writes fold into a [`ShaderState`];
/// each draw takes a snapshot of it. [`encode`](Self::encode) replays the
/// frame's snapshots in one render pass.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    uniform_bind_group: wgpu::BindGroup,
    frame_buffer: wgpu::Buffer,
    object_buffer: wgpu::Buffer,
    object_stride: u64,
    object_slots: u64,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback: Arc<GpuTexture>,
    units: Vec<Option<Arc<GpuTexture>>>,
    meshes: HashMap<MeshKind, GpuMesh>,
    state: ShaderState,
    draws: Vec<PendingDraw>,
    depth_texture: wgpu::TextureView,
}

impl GpuRenderer {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let state = ShaderState::default();
        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::from(&state)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let object_stride = align_to(OBJECT_SIZE, alignment);
        let object_slots = INITIAL_OBJECT_SLOTS;
        let object_buffer = Self::create_object_buffer(&device, object_stride * object_slots);

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(OBJECT_SIZE),
                    },
                    count: None,
                },
            ],
        });
        let uniform_bind_group =
            Self::create_uniform_bind_group(&device, &uniform_layout, &frame_buffer, &object_buffer);

        let texture_layout = texture::texture_bind_group_layout(&device);
        let sampler = texture::create_sampler(&device);
        let fallback = Arc::new(texture::solid(
            &device,
            &queue,
            &texture_layout,
            &sampler,
            [255, 255, 255, 255],
        ));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Planes and half shapes are open, so both faces are drawn.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(&device, width, height);

        Self {
            device,
            queue,
            surface_format,
            pipeline,
            uniform_layout,
            uniform_bind_group,
            frame_buffer,
            object_buffer,
            object_stride,
            object_slots,
            texture_layout,
            sampler,
            fallback,
            units: Vec::new(),
            meshes: HashMap::new(),
            state,
            draws: Vec::new(),
            depth_texture,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Current shading state, as last written.
    pub fn state(&self) -> &ShaderState {
        &self.state
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(&self.device, width, height);
    }

    pub fn is_mesh_loaded(&self, kind: MeshKind) -> bool {
        self.meshes.contains_key(&kind)
    }

    /// Draws recorded since the last [`begin_frame`](Self::begin_frame).
    pub fn pending_draws(&self) -> usize {
        self.draws.len()
    }

    /// Drop the previous frame's draws. Shading state is kept.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    /// Upload this frame's uniforms and record every pending draw into one
    /// render pass targeting `target`.
    pub fn encode(&mut self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        self.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from(&self.state)),
        );
        self.reserve_object_slots(self.draws.len() as u64);

        let stride = self.object_stride as usize;
        if !self.draws.is_empty() {
            let mut bytes = vec![0u8; self.draws.len() * stride];
            for (i, draw) in self.draws.iter().enumerate() {
                let start = i * stride;
                bytes[start..start + OBJECT_SIZE as usize]
                    .copy_from_slice(bytemuck::bytes_of(&draw.object));
            }
            self.queue.write_buffer(&self.object_buffer, 0, &bytes);
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        for (i, draw) in self.draws.iter().enumerate() {
            let Some(mesh) = self.meshes.get(&draw.mesh) else {
                continue;
            };
            let offset = (i * stride) as u32;
            let texture = draw.texture.as_deref().unwrap_or(self.fallback.as_ref());

            pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
            pass.set_bind_group(1, texture.bind_group(), &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for range in &draw.ranges {
                pass.draw_indexed(range.clone(), 0, 0..1);
            }
        }
    }

    fn reserve_object_slots(&mut self, needed: u64) {
        if needed <= self.object_slots {
            return;
        }
        let slots = needed.next_power_of_two();
        tracing::debug!("growing object uniform buffer to {slots} slots");
        self.object_buffer = Self::create_object_buffer(&self.device, self.object_stride * slots);
        self.uniform_bind_group = Self::create_uniform_bind_group(
            &self.device,
            &self.uniform_layout,
            &self.frame_buffer,
            &self.object_buffer,
        );
        self.object_slots = slots;
    }

    fn create_object_buffer(device: &wgpu::Device, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniforms"),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_uniform_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        frame: &wgpu::Buffer,
        objects: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: objects,
                        offset: 0,
                        size: NonZeroU64::new(OBJECT_SIZE),
                    }),
                },
            ],
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

impl TextureBackend for GpuRenderer {
    type Handle = Arc<GpuTexture>;

    fn upload(&mut self, tag: &str, image: &DecodedImage) -> Result<Self::Handle, AssetError> {
        let levels = texture::mip_chain(image, tag)?;
        let uploaded = texture::upload(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.sampler,
            tag,
            &levels,
        )?;
        tracing::debug!(
            "uploaded {tag}: {}x{}, {} mip levels",
            uploaded.width,
            uploaded.height,
            uploaded.mip_level_count
        );
        Ok(Arc::new(uploaded))
    }

    fn bind(&mut self, unit: u32, handle: &Self::Handle) {
        let unit = unit as usize;
        if self.units.len() <= unit {
            self.units.resize(unit + 1, None);
        }
        self.units[unit] = Some(Arc::clone(handle));
    }
}

impl ShadingStage for GpuRenderer {
    fn set_uniform(&mut self, uniform: Uniform) {
        self.state.apply(uniform);
    }
}

impl MeshLibrary for GpuRenderer {
    fn load_mesh(&mut self, kind: MeshKind) {
        if self.meshes.contains_key(&kind) {
            return;
        }
        let geometry = Geometry::build(kind);
        let label = format!("{kind:?}");
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label.as_str()),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label.as_str()),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        tracing::debug!(
            "loaded {label} mesh: {} vertices, {} indices",
            geometry.vertices.len(),
            geometry.indices.len()
        );
        self.meshes.insert(
            kind,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                sections: geometry.sections,
            },
        );
    }
}

impl MeshDrawer for GpuRenderer {
    fn draw(&mut self, primitive: DrawPrimitive) {
        let kind = primitive.mesh();
        let Some(mesh) = self.meshes.get(&kind) else {
            tracing::warn!("draw of {primitive} before its mesh was loaded");
            return;
        };
        let texture = if self.state.use_texture {
            let unit = self.state.object_texture as usize;
            let bound = self.units.get(unit).cloned().flatten();
            if bound.is_none() {
                tracing::debug!("no texture bound to unit {unit}");
            }
            bound
        } else {
            None
        };
        self.draws.push(PendingDraw {
            object: ObjectUniforms::from(&self.state),
            texture,
            mesh: kind,
            ranges: mesh.sections.ranges(primitive),
        });
    }
}
