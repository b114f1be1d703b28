//! Time subsystem.
//!
//! Split in two so frame timing is testable without a real clock:
//! - `FrameClock` is the host side and produces millisecond timestamps
//!   (the native stand-in for an animation-frame timestamp)
//! - `FrameTimer` turns successive timestamps into `FrameTime` deltas

mod frame_clock;

pub use frame_clock::{ClockConfig, FrameClock, FrameTime, FrameTimer};
