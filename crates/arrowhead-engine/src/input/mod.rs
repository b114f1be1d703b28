//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform` translates window system events into [`FrameMessage`]s.
//!
//! [`FrameMessage`]: crate::core::FrameMessage

pub mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::Key;
