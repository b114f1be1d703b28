use anyhow::Result;

use crate::paint::Color;

use super::TransformUniform;

/// Viewport rectangle in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

/// The device operations the frame pipeline needs.
///
/// Calls within a frame arrive in this order: optional `resize`, then
/// `set_viewport`, `clear`, `set_uniforms`, `draw_triangles`. The draw call
/// ends the frame.
pub trait GraphicsBackend {
    /// Applies a new backing-buffer size.
    fn resize(&mut self, width: u32, height: u32);

    fn set_viewport(&mut self, viewport: PixelRect);

    /// Sets the color the frame is cleared to.
    fn clear(&mut self, color: Color);

    fn set_uniforms(&mut self, uniforms: &TransformUniform);

    /// Draws `vertex_count` vertices of the bound geometry as a triangle list.
    ///
    /// Errors are fatal for the frame loop.
    fn draw_triangles(&mut self, vertex_count: u32) -> Result<()>;
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Resize { width: u32, height: u32 },
    SetViewport(PixelRect),
    Clear(Color),
    SetUniforms(TransformUniform),
    DrawTriangles { vertex_count: u32 },
}

/// Headless backend that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub commands: Vec<BackendCommand>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uniforms passed to the most recent `set_uniforms`.
    pub fn last_uniforms(&self) -> Option<TransformUniform> {
        self.commands.iter().rev().find_map(|c| match c {
            BackendCommand::SetUniforms(u) => Some(*u),
            _ => None,
        })
    }

    pub fn draw_calls(&self) -> impl Iterator<Item = u32> + '_ {
        self.commands.iter().filter_map(|c| match c {
            BackendCommand::DrawTriangles { vertex_count } => Some(*vertex_count),
            _ => None,
        })
    }

    pub fn resizes(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, BackendCommand::Resize { .. }))
            .count()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl GraphicsBackend for RecordingBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(BackendCommand::Resize { width, height });
    }

    fn set_viewport(&mut self, viewport: PixelRect) {
        self.commands.push(BackendCommand::SetViewport(viewport));
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(BackendCommand::Clear(color));
    }

    fn set_uniforms(&mut self, uniforms: &TransformUniform) {
        self.commands.push(BackendCommand::SetUniforms(*uniforms));
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<()> {
        self.commands.push(BackendCommand::DrawTriangles { vertex_count });
        Ok(())
    }
}
