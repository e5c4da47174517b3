//! Configuration system for the shadow tracking core.
//!
//! This module defines all configuration structures and enums used to size the
//! core. It provides:
//! 1. **Defaults:** Baseline ring capacities, issue width, and tag table geometry.
//! 2. **Structures:** Hierarchical config for general, shadow ring, release queue, and tag set.
//! 3. **Enums:** Tag table read timing modes.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`. Every structure is validated by [`Config::validate`]
//! before hardware is sized from it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the core.
mod defaults {
    /// Maximum outstanding branches tracked by the shadow ring.
    pub const BRANCHES: usize = 16;

    /// Issue width: lanes per cycle on every per-lane interface.
    pub const WIDTH: usize = 2;

    /// Maximum outstanding deferred releases.
    pub const RELEASE_CAPACITY: usize = 32;

    /// Total tag slots across all ways.
    pub const TAG_ENTRIES: usize = 64;

    /// Two-way set associative.
    pub const TAG_WAYS: usize = 2;

    /// Width of a lookup key in bits (physical address width).
    pub const TAG_WIDTH: u32 = 40;

    /// Concurrent lookups per cycle.
    pub const READ_PORTS: usize = 2;

    /// Concurrent inserts per cycle.
    pub const WRITE_PORTS: usize = 1;
}

/// Where the tag table registers its one cycle of read latency.
///
/// All modes deliver a lookup result two cycles after the query is accepted,
/// matched against the table as it stood in the acceptance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    /// Register the split address along with the way it matched.
    #[serde(alias = "MemDelayAddr")]
    MemDelayAddr,
    /// Register the set's read data and compare it one cycle later.
    #[default]
    #[serde(alias = "MemDelayData")]
    MemDelayData,
    /// Compare immediately and register the hit bit.
    #[serde(alias = "Sync")]
    Sync,
}

/// Root configuration structure containing all core settings.
///
/// # Examples
///
/// ```
/// use shadowline_core::config::{Config, TimingMode};
///
/// let json = r#"{
///     "shadow": { "branches": 8, "width": 4 },
///     "release": { "capacity": 16 },
///     "tag_set": { "entries": 32, "ways": 2, "timing": "sync" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.shadow.branches, 8);
/// assert_eq!(config.tag_set.timing, TimingMode::Sync);
/// assert_eq!(config.tag_set.read_ports, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Shadow ring sizing
    #[serde(default)]
    pub shadow: ShadowConfig,
    /// Release queue sizing
    #[serde(default)]
    pub release: ReleaseConfig,
    /// Tag table geometry and ports
    #[serde(default)]
    pub tag_set: TagSetConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks every section for values the hardware model cannot be sized from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shadow.validate()?;
        self.release.validate()?;
        self.tag_set.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `tracing` event for every simulated cycle
    #[serde(default)]
    pub trace: bool,
}

/// Shadow ring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowConfig {
    /// Ring capacity: maximum outstanding branches (B)
    #[serde(default = "ShadowConfig::default_branches")]
    pub branches: usize,

    /// Lanes per cycle (W), shared with the release queue
    #[serde(default = "ShadowConfig::default_width")]
    pub width: usize,
}

impl ShadowConfig {
    /// Returns the default ring capacity.
    fn default_branches() -> usize {
        defaults::BRANCHES
    }

    /// Returns the default issue width.
    fn default_width() -> usize {
        defaults::WIDTH
    }

    /// Checks that the ring and lane counts are non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("shadow.branches", self.branches)?;
        non_zero("shadow.width", self.width)
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            branches: defaults::BRANCHES,
            width: defaults::WIDTH,
        }
    }
}

/// Release queue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Queue capacity: maximum outstanding deferred releases (R)
    #[serde(default = "ReleaseConfig::default_capacity")]
    pub capacity: usize,
}

impl ReleaseConfig {
    /// Returns the default release queue capacity.
    fn default_capacity() -> usize {
        defaults::RELEASE_CAPACITY
    }

    /// Checks that the queue has at least one slot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("release.capacity", self.capacity)
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::RELEASE_CAPACITY,
        }
    }
}

/// Tag table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSetConfig {
    /// Total tag slots across all ways
    #[serde(default = "TagSetConfig::default_entries")]
    pub entries: usize,

    /// Associativity (1 or 2)
    #[serde(default = "TagSetConfig::default_ways")]
    pub ways: usize,

    /// Width of a lookup key in bits; set index plus stored tag
    #[serde(default = "TagSetConfig::default_tag_width")]
    pub tag_width: u32,

    /// Lookups accepted per cycle
    #[serde(default = "TagSetConfig::default_read_ports")]
    pub read_ports: usize,

    /// Inserts accepted per cycle
    #[serde(default = "TagSetConfig::default_write_ports")]
    pub write_ports: usize,

    /// Where the read latency is registered
    #[serde(default)]
    pub timing: TimingMode,
}

impl TagSetConfig {
    /// Returns the default number of tag slots.
    fn default_entries() -> usize {
        defaults::TAG_ENTRIES
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::TAG_WAYS
    }

    /// Returns the default key width.
    fn default_tag_width() -> u32 {
        defaults::TAG_WIDTH
    }

    /// Returns the default read port count.
    fn default_read_ports() -> usize {
        defaults::READ_PORTS
    }

    /// Returns the default write port count.
    fn default_write_ports() -> usize {
        defaults::WRITE_PORTS
    }

    /// Number of sets (`entries / ways`).
    pub fn sets(&self) -> usize {
        self.entries / self.ways.max(1)
    }

    /// Number of low key bits that select the set.
    pub fn index_bits(&self) -> u32 {
        self.sets().max(1).trailing_zeros()
    }

    /// Checks that the geometry splits into a set index and a non-empty tag.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("tag_set.entries", self.entries)?;
        non_zero("tag_set.read_ports", self.read_ports)?;
        non_zero("tag_set.write_ports", self.write_ports)?;
        if !matches!(self.ways, 1 | 2) {
            return Err(ConfigError::UnsupportedWays(self.ways));
        }
        if self.entries % self.ways != 0 {
            return Err(ConfigError::UnevenSets {
                entries: self.entries,
                ways: self.ways,
            });
        }
        if !self.sets().is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "tag_set.entries / tag_set.ways",
                value: self.sets(),
            });
        }
        let min = self.index_bits() + 1;
        if self.tag_width < min || self.tag_width > 64 {
            return Err(ConfigError::TagWidth {
                width: self.tag_width,
                min,
            });
        }
        Ok(())
    }
}

impl Default for TagSetConfig {
    fn default() -> Self {
        Self {
            entries: defaults::TAG_ENTRIES,
            ways: defaults::TAG_WAYS,
            tag_width: defaults::TAG_WIDTH,
            read_ports: defaults::READ_PORTS,
            write_ports: defaults::WRITE_PORTS,
            timing: TimingMode::default(),
        }
    }
}

fn non_zero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Zero { field })
    } else {
        Ok(())
    }
}
