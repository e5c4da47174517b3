//! Speculative shadow tracking.
//!
//! This module contains the rings that decide when a load that completed under
//! an unresolved branch may become visible:
//! 1. **Shadow:** The branch shadow ring and its in-order head.
//! 2. **Release:** The FIFO of deferred load queue indices.
//! 3. **Signals:** Per-cycle input and output bundles.
//! 4. **Traits:** The published-pointer seam between the rings.
//! 5. **Unit:** Both rings clocked together with the correct relative skew.

/// Deferred load release queue.
pub mod release;

/// Branch shadow ring.
pub mod shadow;

/// Per-cycle signal records.
pub mod signals;

/// Traits for ring components.
pub mod traits;

/// Shadow ring and release queue composition.
pub mod unit;

pub use release::ReleaseQueue;
pub use shadow::ShadowTracker;
pub use unit::ShadowUnit;
