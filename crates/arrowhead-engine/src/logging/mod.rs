//! Logger setup. The rest of the crate only uses the `log` macros.

mod init;

pub use init::{init_logging, LoggingConfig};
