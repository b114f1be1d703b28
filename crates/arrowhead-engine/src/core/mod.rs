//! Frame loop core.
//!
//! The runtime turns host callbacks into [`FrameMessage`]s and hands them to a
//! single [`FrameScheduler`], which owns all mutable frame state. Because the
//! scheduler is driven through `&mut self`, at most one message is processed at
//! a time.

mod message;
mod scheduler;

pub use message::FrameMessage;
pub use scheduler::{AppControl, FrameContext, FrameScheduler, SchedulerState};
