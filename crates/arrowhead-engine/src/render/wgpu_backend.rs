use anyhow::{bail, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;

use super::{GraphicsBackend, PixelRect, TransformUniform, TriangleProgram};

/// [`GraphicsBackend`] over a live wgpu surface.
///
/// Short-lived: built by the runtime for each dispatched message. State set
/// through the trait is applied when `draw_triangles` records and presents the
/// frame.
pub struct WgpuBackend<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    program: &'a TriangleProgram,
    window: Option<&'a Window>,

    viewport: Option<PixelRect>,
    clear: Color,
}

impl<'a, 'w> WgpuBackend<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, program: &'a TriangleProgram) -> Self {
        Self {
            gpu,
            program,
            window: None,
            viewport: None,
            clear: Color::BLACK,
        }
    }

    /// Notifies `window` right before presenting (lets the compositor pace frames).
    pub fn with_window(mut self, window: &'a Window) -> Self {
        self.window = Some(window);
        self
    }

    /// Clamps the requested viewport to the configured surface.
    fn effective_viewport(&self) -> Option<PixelRect> {
        let size = self.gpu.size();
        let requested = self
            .viewport
            .unwrap_or(PixelRect::from_size(size.width, size.height));

        let x = requested.x.min(size.width);
        let y = requested.y.min(size.height);
        let width = requested.width.min(size.width - x);
        let height = requested.height.min(size.height - y);

        (width > 0 && height > 0).then_some(PixelRect { x, y, width, height })
    }
}

impl GraphicsBackend for WgpuBackend<'_, '_> {
    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("reconfiguring surface to {width}x{height}");
        self.gpu.resize(PhysicalSize::new(width, height));
    }

    fn set_viewport(&mut self, viewport: PixelRect) {
        self.viewport = Some(viewport);
    }

    fn clear(&mut self, color: Color) {
        self.clear = color;
    }

    fn set_uniforms(&mut self, uniforms: &TransformUniform) {
        self.program.write_uniforms(self.gpu.queue(), uniforms);
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<()> {
        let Some(viewport) = self.effective_viewport() else {
            log::trace!("surface has no area; frame dropped");
            return Ok(());
        };

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err.clone()) {
                    SurfaceErrorAction::Fatal => bail!("surface acquisition failed fatally: {err}"),
                    action => {
                        log::warn!("surface error ({err}); {action:?}");
                        Ok(())
                    }
                };
            }
        };

        // Pass is dropped before the encoder is moved into submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("arrowhead triangle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(
                viewport.x as f32,
                viewport.y as f32,
                viewport.width as f32,
                viewport.height as f32,
                0.0,
                1.0,
            );

            self.program.draw(&mut rpass, vertex_count);
        }

        if let Some(window) = self.window {
            window.pre_present_notify();
        }
        self.gpu.submit(frame);

        Ok(())
    }
}
