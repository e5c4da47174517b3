//! Common utilities and types shared by every component of the core.
//!
//! 1. **Ring Arithmetic:** Wrapping index helpers for the fixed-capacity rings.
//! 2. **Error Handling:** Configuration and stimulus errors reported at load time.

/// Configuration and stimulus error types.
pub mod error;

/// Modulo index arithmetic for circular buffers.
pub mod ring;

pub use error::{ConfigError, StimulusError};
pub use ring::Ring;
