//! Output
//!
//! Frame snapshot logging for headless runs.

pub mod logger;

pub use logger::{FrameLogger, OutputError};
