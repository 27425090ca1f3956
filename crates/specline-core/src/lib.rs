//! Specline Core
//!
//! Shared ambient functionality for the Specline crates: logging bootstrap
//! and frame profiling.

pub mod logging;
pub mod profiling;
