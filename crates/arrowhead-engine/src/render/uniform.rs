use bytemuck::{Pod, Zeroable};

use crate::scene::Vertex2D;

/// Per-draw transform uniform.
///
/// Layout matches `Transform` in `shaders/triangle.wgsl` (32 bytes):
/// rotation at 0, translation at 8, scale at 16.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    /// Radians, counter-clockwise.
    pub rotation: f32,
    pub _pad0: f32,
    pub translation: [f32; 2],
    pub scale: [f32; 2],
    pub _pad1: [f32; 2],
}

impl TransformUniform {
    pub const fn new(rotation: f32, translation: [f32; 2], scale: [f32; 2]) -> Self {
        Self {
            rotation,
            _pad0: 0.0,
            translation,
            scale,
            _pad1: [0.0; 2],
        }
    }

    /// CPU mirror of `vs_main`: scale, rotate, translate; z = 0, w = 1.
    pub fn transform_point(&self, v: Vertex2D) -> [f32; 4] {
        let x0 = v.x * self.scale[0];
        let y0 = v.y * self.scale[1];

        let (sin, cos) = self.rotation.sin_cos();
        let x = x0 * cos - y0 * sin;
        let y = x0 * sin + y0 * cos;

        [x + self.translation[0], y + self.translation[1], 0.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn layout_is_32_bytes() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 32);
        assert_eq!(std::mem::offset_of!(TransformUniform, translation), 8);
        assert_eq!(std::mem::offset_of!(TransformUniform, scale), 16);
    }

    #[test]
    fn identity_transform_keeps_point() {
        let u = TransformUniform::new(0.0, [0.0, 0.0], [1.0, 1.0]);
        assert_eq!(u.transform_point(Vertex2D::new(0.5, 0.5)), [0.5, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        let u = TransformUniform::new(std::f32::consts::FRAC_PI_2, [0.0, 0.0], [1.0, 1.0]);
        assert!(approx(u.transform_point(Vertex2D::new(1.0, 0.0)), [0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn scale_applies_before_rotation() {
        // Rotating first would land on (0, 1).
        let u = TransformUniform::new(std::f32::consts::FRAC_PI_2, [0.0, 0.0], [2.0, 1.0]);
        assert!(approx(u.transform_point(Vertex2D::new(1.0, 0.0)), [0.0, 2.0, 0.0, 1.0]));
    }

    #[test]
    fn translation_applies_last() {
        let u = TransformUniform::new(std::f32::consts::PI, [0.25, -0.5], [1.0, 1.0]);
        assert!(approx(
            u.transform_point(Vertex2D::new(0.5, 0.0)),
            [-0.25, -0.5, 0.0, 1.0]
        ));
    }
}
