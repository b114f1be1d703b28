use anyhow::Result;

use crate::coords::CanvasDimensions;
use crate::paint::Color;
use crate::scene::{GeometryStore, SimulationState};

use super::{GraphicsBackend, PixelRect, TransformUniform};

const CLEAR_COLOR: Color = Color::BLACK;

/// Turns simulation state into one draw call.
#[derive(Debug, Clone, Default)]
pub struct Renderer;

impl Renderer {
    /// Scale that maps device pixels onto the 2-unit clip-space range.
    ///
    /// `None` for an empty canvas, where the scale would be infinite.
    pub fn scale_for(canvas: &CanvasDimensions) -> Option<[f32; 2]> {
        if canvas.is_empty() {
            return None;
        }
        let dpr = canvas.device_pixel_ratio;
        Some([
            (2.0 * dpr / canvas.width_px as f64) as f32,
            (2.0 * dpr / canvas.height_px as f64) as f32,
        ])
    }

    /// Uniform values for the current frame.
    pub fn uniforms(
        simulation: &SimulationState,
        canvas: &CanvasDimensions,
    ) -> Option<TransformUniform> {
        let scale = Self::scale_for(canvas)?;
        Some(TransformUniform::new(
            simulation.angle,
            simulation.translation(),
            scale,
        ))
    }

    /// Draws one frame. Returns `false` when the frame was skipped because the
    /// canvas has no area.
    pub fn render<B: GraphicsBackend + ?Sized>(
        &self,
        simulation: &SimulationState,
        canvas: &CanvasDimensions,
        geometry: &GeometryStore,
        backend: &mut B,
    ) -> Result<bool> {
        let Some(uniforms) = Self::uniforms(simulation, canvas) else {
            log::trace!("canvas is empty; skipping frame");
            return Ok(false);
        };

        backend.set_viewport(PixelRect::from_size(canvas.width_px, canvas.height_px));
        backend.clear(CLEAR_COLOR);
        backend.set_uniforms(&uniforms);
        backend.draw_triangles(geometry.vertex_count())?;

        Ok(true)
    }
}
