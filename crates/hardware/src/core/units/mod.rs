//! Functional units that serve the shadow tracking core.
//!
//! This module contains the associative tag set used by address generation to
//! detect overlap between in-flight memory operations.

/// Pipelined set-associative tag set with replacement policies.
pub mod cache;
