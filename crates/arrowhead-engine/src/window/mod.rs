//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! feeds the frame scheduler.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
