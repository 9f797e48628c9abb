use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// How the window surface is set up.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    /// Pick an sRGB surface format when one is offered.
    pub prefer_srgb: bool,
    /// Wait for vblank. Without it the surface uses the lowest-latency mode
    /// it supports.
    pub vsync: bool,
    pub power: wgpu::PowerPreference,
    /// Frames the surface may queue ahead (a hint).
    pub frame_latency: u32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            vsync: true,
            power: wgpu::PowerPreference::LowPower,
            frame_latency: 2,
        }
    }
}

/// Device, queue and configured surface for the game window.
///
/// The canvas is the only thing ever drawn, so no features or raised limits
/// are requested.
pub struct Gpu<'w> {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // Window has no area; the surface stays unconfigured until it does.
    suspended: bool,
}

/// An acquired surface texture with the encoder that draws into it.
pub struct GpuFrame {
    texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Why no frame could be acquired.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AcquireError {
    /// Nothing to draw into this frame; the surface may recover by the next.
    Skip,
    Fatal,
}

impl<'w> Gpu<'w> {
    /// Binds a surface to `window`. Drive with `pollster::block_on`.
    pub async fn new(window: &'w Window, options: &SurfaceOptions) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: options.power,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("shard device"),
                ..Default::default()
            })
            .await
            .context("failed to open GPU device")?;

        let caps = surface.get_capabilities(&adapter);
        let config = surface_config(&caps, options, size).context("surface offers no formats")?;

        let suspended = size.width == 0 || size.height == 0;
        if !suspended {
            surface.configure(&device, &config);
        }

        let info = adapter.get_info();
        log::info!(
            "presenting on {} ({:?}) as {:?} {:?}, {}x{}",
            info.name,
            info.backend,
            config.format,
            config.present_mode,
            config.width,
            config.height
        );

        Ok(Self { _instance: instance, surface, device, queue, config, suspended })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Follows the window's inner size. A zero-area size suspends
    /// acquisition until a real size arrives.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.suspended = size.width == 0 || size.height == 0;
        if self.suspended {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next surface texture. A lost or outdated surface is
    /// reconfigured and the frame skipped.
    pub fn acquire(&mut self) -> Result<GpuFrame, AcquireError> {
        if self.suspended {
            return Err(AcquireError::Skip);
        }

        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => return Err(self.recover(err)),
        };
        let view = texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("shard frame"),
        });

        Ok(GpuFrame { texture, view, encoder })
    }

    /// Submits the frame's commands and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { texture, view, encoder } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        texture.present();
    }

    fn recover(&mut self, err: SurfaceError) -> AcquireError {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                log::debug!("surface {err}; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                AcquireError::Skip
            }
            SurfaceError::OutOfMemory => {
                log::error!("surface out of memory");
                AcquireError::Fatal
            }
            SurfaceError::Timeout | SurfaceError::Other => AcquireError::Skip,
        }
    }
}

fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    options: &SurfaceOptions,
    size: PhysicalSize<u32>,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = pick_format(&caps.formats, options.prefer_srgb)?;
    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: pick_present_mode(&caps.present_modes, options.vsync),
        alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: Vec::new(),
        desired_maximum_frame_latency: options.frame_latency,
    })
}

fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    let srgb = formats.iter().copied().find(|f| f.is_srgb());
    match srgb {
        Some(f) if prefer_srgb => Some(f),
        _ => formats.first().copied(),
    }
}

fn pick_present_mode(modes: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    // Fifo is the one mode every surface supports.
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|m| modes.contains(m))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{PresentMode, TextureFormat};

    #[test]
    fn srgb_format_wins_only_when_preferred() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(pick_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(pick_format(&formats[..1], true), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_means_no_config() {
        let caps = wgpu::SurfaceCapabilities::default();
        let config = surface_config(&caps, &SurfaceOptions::default(), PhysicalSize::new(8, 8));
        assert!(config.is_none());
    }

    #[test]
    fn vsync_off_prefers_mailbox_then_immediate() {
        let all = [PresentMode::Fifo, PresentMode::Immediate, PresentMode::Mailbox];
        assert_eq!(pick_present_mode(&all, true), PresentMode::Fifo);
        assert_eq!(pick_present_mode(&all, false), PresentMode::Mailbox);
        assert_eq!(pick_present_mode(&all[..2], false), PresentMode::Immediate);
        assert_eq!(pick_present_mode(&all[..1], false), PresentMode::Fifo);
    }

    #[test]
    fn config_never_has_zero_extent() {
        let caps = wgpu::SurfaceCapabilities {
            formats: vec![TextureFormat::Rgba8Unorm],
            ..Default::default()
        };
        let options = SurfaceOptions { frame_latency: 3, ..SurfaceOptions::default() };
        let config = surface_config(&caps, &options, PhysicalSize::new(0, 0)).expect("config");

        assert_eq!((config.width, config.height), (1, 1));
        assert_eq!(config.alpha_mode, wgpu::CompositeAlphaMode::Auto);
        assert_eq!(config.desired_maximum_frame_latency, 3);
    }
}
