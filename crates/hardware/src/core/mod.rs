//! Core hardware model.
//!
//! This module contains the clocked components: the shadow rings that gate
//! load visibility, and the functional units they cooperate with.

/// Shadow ring, release queue, and their per-cycle signals.
pub mod pipeline;

/// Functional units (tag set and its replacement policies).
pub mod units;

pub use self::pipeline::ShadowUnit;
pub use self::units::cache::TagSet;
