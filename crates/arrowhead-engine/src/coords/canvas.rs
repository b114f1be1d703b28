use winit::window::Window;

/// Layout metrics reported by the host display surface.
pub trait SurfaceMetrics {
    /// Client size in logical pixels, `(width, height)`.
    fn client_size(&self) -> (f64, f64);

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Backing-buffer size, `floor(client * ratio)` per axis.
    ///
    /// Hosts that already know their physical size report it directly.
    fn display_size(&self) -> (u32, u32) {
        let ratio = sanitize_ratio(self.device_pixel_ratio());
        let (w, h) = self.client_size();
        (to_display_px(w, ratio), to_display_px(h, ratio))
    }
}

impl SurfaceMetrics for Window {
    fn client_size(&self) -> (f64, f64) {
        let logical = self.inner_size().to_logical::<f64>(self.scale_factor());
        (logical.width, logical.height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.scale_factor()
    }

    fn display_size(&self) -> (u32, u32) {
        let physical = self.inner_size();
        (physical.width, physical.height)
    }
}

/// Backing-buffer size of the canvas in physical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasDimensions {
    pub width_px: u32,
    pub height_px: u32,
    pub device_pixel_ratio: f64,
}

impl Default for CanvasDimensions {
    fn default() -> Self {
        Self {
            width_px: 0,
            height_px: 0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl CanvasDimensions {
    pub const fn new(width_px: u32, height_px: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width_px,
            height_px,
            device_pixel_ratio,
        }
    }

    /// Re-derives the backing-buffer size from `surface`.
    ///
    /// Returns `true` and stores the new size only when it differs from the
    /// current one. The ratio is always refreshed since the renderer reads it
    /// every frame.
    pub fn resize<S: SurfaceMetrics + ?Sized>(&mut self, surface: &S) -> bool {
        let (width, height) = surface.display_size();
        self.device_pixel_ratio = sanitize_ratio(surface.device_pixel_ratio());

        if width == self.width_px && height == self.height_px {
            return false;
        }

        self.width_px = width;
        self.height_px = height;
        true
    }

    /// Whether either axis is zero (minimized window, collapsed layout).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width_px == 0 || self.height_px == 0
    }
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

fn to_display_px(client: f64, ratio: f64) -> u32 {
    if !client.is_finite() || client <= 0.0 {
        return 0;
    }
    (client * ratio).floor().min(u32::MAX as f64) as u32
}
