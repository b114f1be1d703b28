//! Color primitives used for clears and shader constants.

mod color;

pub use color::Color;
