//! Trail Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Ambient functionality shared by the workspace binaries. At present this
//! is the logging setup used by `trail-server`.

pub mod logging;

pub use logging::{init_logging, LogConfig};
