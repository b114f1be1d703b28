//! Canvas sizing.
//!
//! The drawable backing buffer is measured in physical pixels; hosts report a
//! logical (client) size plus a device pixel ratio.

mod canvas;

pub use canvas::{CanvasDimensions, SurfaceMetrics};
