//! Speculative load shadow tracking library.
//!
//! This crate implements a cycle-accurate model of the logic that decides when
//! a load completed under unresolved branches may become visible:
//! 1. **Shadow Ring:** Per-branch shadow bits with in-order head retirement,
//!    misprediction rollback, and flush.
//! 2. **Release Queue:** Deferred load queue indices released in program order
//!    once the shadow ring's head passes them.
//! 3. **Tag Set:** A pipelined 1- or 2-way associative tag table with one-bit LRU.
//! 4. **Simulation:** Configuration, lock-step driver, stimulus loading, and statistics.

/// Common types (ring arithmetic, configuration errors).
pub mod common;
/// Core configuration (defaults, timing modes, hierarchical config structures).
pub mod config;
/// Clocked hardware components (shadow unit, tag set).
pub mod core;
/// Lock-step simulator and stimulus loading.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or [`Config::from_json`].
pub use crate::config::Config;
/// Shadow ring and release queue clocked together.
pub use crate::core::ShadowUnit;
/// Pipelined associative tag table.
pub use crate::core::TagSet;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
