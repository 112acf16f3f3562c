//! wgpu implementation of the glyph geometry seam.
//!
//! Each glyph owns a texture, a bind group and its quad's vertex/index
//! buffers. [`GpuBackend::draw`] only records the draw; [`WgpuGlyphBackend::flush`]
//! writes the frame's instance data and replays the recorded draws into a
//! render pass. Flush at most once per queue submission: the instance buffer
//! is rewritten by every flush.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use wgpu::*;

use crate::error::RenderError;
use crate::glyph_image::GlyphImage;
use crate::gpu::{GpuBackend, QuadMesh, Vertex};

/// Initial instance buffer capacity, in quads.
const INITIAL_INSTANCE_CAPACITY: usize = 32;

/// Draws recorded without a flush beyond this are dropped.
pub const MAX_PENDING_DRAWS: usize = 1 << 16;

/// Per-draw placement in normalized device coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadInstance {
    origin: [f32; 2],
    size: [f32; 2],
}

impl QuadInstance {
    /// Map a pixel-space quad (origin top-left, y up) to NDC.
    fn new(
        x: f32,
        y: f32,
        width: u32,
        height: u32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Self {
        let vw = viewport_width.max(1) as f32;
        let vh = viewport_height.max(1) as f32;
        Self {
            origin: [-1.0 + 2.0 * x / vw, 1.0 + 2.0 * y / vh],
            size: [2.0 * width as f32 / vw, 2.0 * height as f32 / vh],
        }
    }
}

struct GeometryResources {
    #[allow(dead_code)] // GPU lifetime: must outlive the bind group's view
    texture: Texture,
    #[allow(dead_code)] // GPU lifetime: must outlive the bind group which references this view
    view: TextureView,
    bind_group: BindGroup,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
    width: u32,
    height: u32,
}

/// GPU resources for one glyph, owned by exactly one glyph. Released when
/// dropped and no longer referenced by an unflushed draw.
///
/// Geometry cannot be duplicated and handed to a second glyph:
///
/// ```compile_fail
/// fn share(geometry: &overtext_render::WgpuGeometry) -> overtext_render::WgpuGeometry {
///     geometry.clone()
/// }
/// ```
pub struct WgpuGeometry {
    resources: Arc<GeometryResources>,
}

impl WgpuGeometry {
    pub fn width(&self) -> u32 {
        self.resources.width
    }

    pub fn height(&self) -> u32 {
        self.resources.height
    }
}

impl std::fmt::Debug for WgpuGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuGeometry")
            .field("width", &self.resources.width)
            .field("height", &self.resources.height)
            .finish()
    }
}

/// Records glyph draws for one frame and submits them on [`flush`](Self::flush).
pub struct WgpuGlyphBackend {
    device: Arc<Device>,
    queue: Arc<Queue>,
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    sampler: Sampler,

    instance_buffer: Buffer,
    instance_capacity: usize,

    instances: Vec<QuadInstance>,
    pending: Vec<Arc<GeometryResources>>,
    next_texture_id: u64,
}

impl WgpuGlyphBackend {
    pub fn new(device: Arc<Device>, queue: Arc<Queue>, surface_format: TextureFormat) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Glyph Bind Group Layout"),
            entries: &[
                // Glyph texture
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: TextureSampleType::Float { filterable: true },
                        view_dimension: TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Glyph quads are drawn at their native pixel size
        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("Glyph Sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            ..Default::default()
        });

        let pipeline = Self::create_pipeline(&device, surface_format, &bind_group_layout);

        let instance_buffer = Self::create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
            sampler,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            instances: Vec::new(),
            pending: Vec::new(),
            next_texture_id: 0,
        }
    }

    fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
        device.create_buffer(&BufferDescriptor {
            label: Some("Glyph Instance Buffer"),
            size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_pipeline(
        device: &Device,
        format: TextureFormat,
        bind_group_layout: &BindGroupLayout,
    ) -> RenderPipeline {
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Glyph Shader"),
            source: ShaderSource::Wgsl(include_str!("shaders/glyph_quad.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Glyph Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Glyph Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: VertexStepMode::Vertex,
                        attributes: &vertex_attr_array![
                            0 => Float32x3, // position
                            1 => Float32x2, // tex_coords
                        ],
                    },
                    VertexBufferLayout {
                        array_stride: std::mem::size_of::<QuadInstance>() as u64,
                        step_mode: VertexStepMode::Instance,
                        attributes: &vertex_attr_array![
                            2 => Float32x2, // origin
                            3 => Float32x2, // size
                        ],
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format,
                    // Glyph textures hold straight-alpha colour
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Draws recorded since the last flush.
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Submit the recorded draws into `render_pass` and start a new frame.
    ///
    /// The instance data is written with [`Queue::write_buffer`], which takes
    /// effect at the next submit. Call this once per submitted command
    /// buffer; a second flush before the submit would overwrite the first
    /// one's instances.
    pub fn flush(&mut self, render_pass: &mut RenderPass<'_>) {
        if self.pending.is_empty() {
            return;
        }

        let required_capacity = self.instances.len();
        if required_capacity > self.instance_capacity {
            let new_capacity = (required_capacity * 2).max(INITIAL_INSTANCE_CAPACITY);
            self.instance_buffer = Self::create_instance_buffer(&self.device, new_capacity);
            self.instance_capacity = new_capacity;
        }

        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));

        log::trace!("Flushing {} glyph draws", self.pending.len());

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        for (index, resources) in self.pending.iter().enumerate() {
            let instance = index as u32;
            render_pass.set_bind_group(0, &resources.bind_group, &[]);
            render_pass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
            render_pass.set_index_buffer(resources.index_buffer.slice(..), IndexFormat::Uint16);
            render_pass.draw_indexed(0..resources.index_count, 0, instance..instance + 1);
        }

        self.pending.clear();
        self.instances.clear();
    }
}

impl GpuBackend for WgpuGlyphBackend {
    type Geometry = WgpuGeometry;

    fn create_geometry(
        &mut self,
        mesh: &QuadMesh,
        image: &GlyphImage,
    ) -> Result<WgpuGeometry, RenderError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage);
        }

        let expected = width as usize * height as usize;
        if image.pixels().len() != expected {
            return Err(RenderError::InvalidTextureData {
                expected,
                actual: image.pixels().len(),
            });
        }

        let limit = self.device.limits().max_texture_dimension_2d;
        if width > limit || height > limit {
            return Err(RenderError::TextureTooLarge {
                width,
                height,
                limit,
            });
        }

        let id = self.next_texture_id;
        self.next_texture_id += 1;

        let size = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some(&format!("Glyph Texture {}", id)),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            &image.to_rgba8(),
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&BindGroupDescriptor {
            label: Some(&format!("Glyph Bind Group {}", id)),
            layout: &self.bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::TextureView(&view),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let vertex_buffer = self.device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Glyph Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Glyph Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: BufferUsages::INDEX,
        });

        log::debug!("Created glyph texture {}: {}x{}", id, width, height);

        Ok(WgpuGeometry {
            resources: Arc::new(GeometryResources {
                texture,
                view,
                bind_group,
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
                width,
                height,
            }),
        })
    }

    fn draw(
        &mut self,
        geometry: &WgpuGeometry,
        x: f32,
        y: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) {
        if self.pending.len() >= MAX_PENDING_DRAWS {
            log::warn!(
                "Dropping glyph draw: {} draws pending without a flush",
                self.pending.len()
            );
            return;
        }
        self.instances.push(QuadInstance::new(
            x,
            y,
            geometry.width(),
            geometry.height(),
            viewport_width,
            viewport_height,
        ));
        self.pending.push(Arc::clone(&geometry.resources));
    }
}
