//! Configuration and stimulus error definitions.
//!
//! The per-cycle datapath has no recoverable error channel: a caller that
//! over-allocates a ring or enqueues into a full queue violates a contract that
//! is checked only by debug assertions. The errors in this module cover the
//! places where failure is recoverable: turning a user-supplied
//! configuration into sized hardware structures, and loading a stimulus.

use thiserror::Error;

/// Reasons a [`Config`](crate::config::Config) cannot be turned into hardware.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A ring or table was configured with no slots.
    #[error("{field} must be non-zero")]
    Zero {
        /// Dotted path of the offending field.
        field: &'static str,
    },

    /// A capacity that is split into index bits is not a power of two.
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The configured value.
        value: usize,
    },

    /// The tag table only models direct-mapped and two-way organizations.
    #[error("tag_set.ways must be 1 or 2, got {0}")]
    UnsupportedWays(usize),

    /// `entries` cannot be split evenly across the configured ways.
    #[error("tag_set.entries ({entries}) is not a multiple of tag_set.ways ({ways})")]
    UnevenSets {
        /// Total tag slots.
        entries: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// The tag width leaves no bits above the set index, or exceeds 64 bits.
    #[error("tag_set.tag_width must be in {min}..=64, got {width}")]
    TagWidth {
        /// The configured width.
        width: u32,
        /// Smallest width that still stores at least one tag bit.
        min: u32,
    },

    /// The configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a stimulus file cannot be loaded.
#[derive(Debug, Error)]
pub enum StimulusError {
    /// The stimulus text is not a valid cycle list.
    #[error("invalid stimulus: {0}")]
    Parse(#[from] serde_json::Error),

    /// The stimulus file could not be read.
    #[error("cannot read stimulus: {0}")]
    Io(#[from] std::io::Error),
}
