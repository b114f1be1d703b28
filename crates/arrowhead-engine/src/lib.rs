//! Arrowhead engine crate.
//!
//! Owns the platform + GPU runtime and the frame pipeline that spins and moves
//! the arrow: input, simulation, canvas sizing and the triangle renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
