use winit::dpi::PhysicalSize;

/// How the GPU context is brought up for the arrow window.
///
/// Defaults ask for nothing beyond a single vertex buffer and one uniform
/// block, so GL-only and software adapters qualify.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may probe. Narrowed via `WGPU_BACKEND` when set.
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,

    /// Pick an sRGB swapchain format if the surface offers one.
    pub prefer_srgb: bool,

    /// FIFO paces ticks to the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to the first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub features: wgpu::Features,
    pub limits: wgpu::Limits,

    pub frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::LowPower,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            features: wgpu::Features::empty(),
            limits: wgpu::Limits::downlevel_webgl2_defaults(),
            frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Backends after applying the `WGPU_BACKEND` override.
    pub(crate) fn effective_backends(&self) -> wgpu::Backends {
        wgpu::Backends::from_env().unwrap_or(self.backends)
    }

    /// Swapchain configuration for a window of `size`.
    pub(crate) fn surface_config(
        &self,
        format: wgpu::TextureFormat,
        alpha_mode: wgpu::CompositeAlphaMode,
        size: PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: self.present_mode,
            alpha_mode,
            view_formats: Vec::new(),
            desired_maximum_frame_latency: self.frame_latency,
        }
    }
}
