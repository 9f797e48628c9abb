use winit::window::Window;

use crate::backend::Bitmap;

use super::gpu::{AcquireError, Gpu};

/// Result of one presentation attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentOutcome {
    Presented,
    /// The surface was lost, outdated or timed out; try again next frame.
    Skipped,
    /// The surface cannot be recovered.
    Fatal,
}

/// Uploads the software canvas into a texture and draws it over the surface.
///
/// GPU objects are created lazily and rebuilt when the surface format or the
/// canvas size changes.
#[derive(Default)]
pub struct CanvasPresenter {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    texture: Option<wgpu::Texture>,
    texture_size: (u32, u32),
    bind_group: Option<wgpu::BindGroup>,
}

impl CanvasPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `pixels` and presents it.
    pub fn present(&mut self, gpu: &mut Gpu<'_>, window: &Window, pixels: &Bitmap) -> PresentOutcome {
        let (w, h) = pixels.size();
        if w == 0 || h == 0 {
            return PresentOutcome::Skipped;
        }

        self.ensure_pipeline(gpu);
        self.ensure_texture(gpu, w, h);
        self.upload(gpu, pixels);

        let mut frame = match gpu.acquire() {
            Ok(f) => f,
            Err(AcquireError::Skip) => return PresentOutcome::Skipped,
            Err(AcquireError::Fatal) => return PresentOutcome::Fatal,
        };

        let (Some(pipeline), Some(bind_group)) = (self.pipeline.as_ref(), self.bind_group.as_ref())
        else {
            return PresentOutcome::Skipped;
        };

        // Pass dropped before the encoder is moved into submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shard present pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        window.pre_present_notify();
        gpu.submit(frame);

        PresentOutcome::Presented
    }

    fn upload(&self, gpu: &Gpu<'_>, pixels: &Bitmap) {
        let Some(texture) = self.texture.as_ref() else { return };
        let (w, h) = pixels.size();

        gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(pixels.pixels()),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w * 4),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
    }

    fn ensure_pipeline(&mut self, gpu: &Gpu<'_>) {
        let format = gpu.format();
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        let device = gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shard present shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/present.wgsl").into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shard present bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
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
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shard present pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shard present pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Nearest keeps pixel edges crisp when the window is larger than the canvas.
        self.sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shard present sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);

        // The texture format follows the surface's sRGB-ness.
        self.texture = None;
        self.bind_group = None;
    }

    fn ensure_texture(&mut self, gpu: &Gpu<'_>, width: u32, height: u32) {
        if self.texture.is_some() && self.texture_size == (width, height) {
            return;
        }

        let (Some(bgl), Some(sampler)) = (self.bind_group_layout.as_ref(), self.sampler.as_ref())
        else {
            return;
        };

        let format = canvas_format(gpu.format());
        let device = gpu.device();

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shard canvas texture"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shard present bind group"),
            layout: bgl,
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

        log::debug!("canvas texture {width}x{height} ({format:?})");

        self.texture = Some(texture);
        self.texture_size = (width, height);
        self.bind_group = Some(bind_group);
    }
}

/// Canvas pixels are sRGB-encoded bytes. On an sRGB surface the texture is
/// sampled as sRGB so the round trip is exact; otherwise bytes pass through.
fn canvas_format(surface: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if surface.is_srgb() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}
