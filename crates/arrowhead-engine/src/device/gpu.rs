use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::{surface, GpuFrame, GpuInit, SurfaceErrorAction};

/// wgpu device, queue and swapchain for the arrow window.
///
/// `'w` is the window borrow the surface is created from.
pub struct Gpu<'w> {
    // Dropped after the surface.
    surface: wgpu::Surface<'w>,
    _instance: wgpu::Instance,

    device: wgpu::Device,
    queue: wgpu::Queue,

    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Brings up the GPU context for `window`.
    ///
    /// Any failure here means the host cannot run the renderer at all.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.effective_backends(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("no drawable surface for the window")?;

        let adapter = request_adapter(&instance, &surface, &init).await?;
        let (device, queue) = request_device(&adapter, &init).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .context("adapter cannot present to this surface")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);

        let config = init.surface_config(format, alpha_mode, size);
        if size.width > 0 && size.height > 0 {
            surface.configure(&device, &config);
        }
        log::debug!(
            "swapchain {:?} {}x{} ({:?}, {:?})",
            format,
            size.width,
            size.height,
            init.present_mode,
            alpha_mode
        );

        Ok(Self {
            surface,
            _instance: instance,
            device,
            queue,
            config,
            size,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Backing-buffer size in physical pixels, as last requested.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the swapchain. A zero-sized request is remembered but
    /// not applied.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if surface::apply_size(&mut self.config, &mut self.size, new_size) {
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Acquires the next swapchain image and an encoder to record into.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                label: Some("arrowhead swapchain view"),
                ..Default::default()
            });
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("arrowhead frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents its image.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit([encoder.finish()]);
        drop(view);
        surface_texture.present();
    }

    /// Maps a failed acquisition to what the frame loop should do, restoring
    /// the swapchain when it went stale.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::from_error(&err);
        let drawable = self.size.width > 0 && self.size.height > 0;
        if action == SurfaceErrorAction::Reconfigured && drawable {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

async fn request_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
    init: &GpuInit,
) -> Result<wgpu::Adapter> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::from_env()
                .unwrap_or(init.power_preference),
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .context("no GPU adapter can present to this window")?;

    let info = adapter.get_info();
    log::info!(
        "adapter: {} ({:?}, {:?})",
        info.name,
        info.backend,
        info.device_type
    );
    Ok(adapter)
}

async fn request_device(
    adapter: &wgpu::Adapter,
    init: &GpuInit,
) -> Result<(wgpu::Device, wgpu::Queue)> {
    let missing = init.features - adapter.features();
    anyhow::ensure!(missing.is_empty(), "adapter lacks required features {missing:?}");

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("arrowhead device"),
            required_features: init.features,
            required_limits: init.limits.clone().using_resolution(adapter.limits()),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("GPU device request was refused")
}
