//! GPU rendering subsystem.
//!
//! `Renderer` derives the per-frame uniforms and issues commands through the
//! [`GraphicsBackend`] seam. `WgpuBackend` executes them on a real surface;
//! `RecordingBackend` captures them for headless runs and tests.
//!
//! Convention:
//! - geometry is uploaded once, in clip-space units
//! - the vertex shader applies scale, then rotation, then translation

mod backend;
mod program;
mod renderer;
mod uniform;
mod wgpu_backend;

pub use backend::{BackendCommand, GraphicsBackend, PixelRect, RecordingBackend};
pub use program::{ProgramError, TriangleProgram, TRIANGLE_SHADER};
pub use renderer::Renderer;
pub use uniform::TransformUniform;
pub use wgpu_backend::WgpuBackend;
