/// Opaque-by-default linear RGBA, used for the frame clear.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b, a] = [self.r, self.g, self.b, self.a].map(f64::from);
        wgpu::Color { r, g, b, a }
    }
}
