use crate::input::Key;

/// Commands consumed by the frame scheduler, in arrival order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameMessage {
    KeyDown(Key),
    KeyUp(Key),

    /// The window lost keyboard focus.
    FocusLost,

    /// Display refresh tick carrying a host timestamp in milliseconds.
    Tick { timestamp_ms: f64 },

    /// The host is shutting down the loop.
    Stop,
}
