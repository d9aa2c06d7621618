use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Canonical maximum number of assets placed per item
pub const DEFAULT_MAX_PER_ITEM: usize = 20;

/// Canonical number of leading slots where global uniqueness is preferred
pub const DEFAULT_UNIQUENESS_WINDOW: usize = 2;

/// Canonical minimum score fraction an alternative must reach before a
/// reserved candidate is skipped
pub const DEFAULT_RELAX_THRESHOLD: f32 = 0.7;

/// Canonical minimum list length below which the fallback refill kicks in
pub const DEFAULT_MIN_FILL: usize = 10;

/// Tunable parameters of the allocation engine.
///
/// Defaults carry the canonical values; a run profile may override any
/// subset. `validate()` runs before any allocation state is built, so a
/// bad configuration never produces a partial run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AllocationConfig {
    /// Upper bound on accepted assets per item
    pub max_per_item: usize,

    /// Leading result slots in which cross-item uniqueness is preferred
    pub uniqueness_window: usize,

    /// Fraction of a reserved candidate's score an unreserved alternative
    /// must reach for the reserved one to be skipped
    pub relax_threshold: f32,

    /// Items with fewer accepted assets than this are refilled from the
    /// full ranked list, ignoring uniqueness
    pub min_fill: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            max_per_item: DEFAULT_MAX_PER_ITEM,
            uniqueness_window: DEFAULT_UNIQUENESS_WINDOW,
            relax_threshold: DEFAULT_RELAX_THRESHOLD,
            min_fill: DEFAULT_MIN_FILL,
        }
    }
}

impl AllocationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_per_item == 0 {
            return Err(EngineError::InvalidConfig(
                "max_per_item must be > 0".to_string(),
            ));
        }
        if self.uniqueness_window > self.max_per_item {
            return Err(EngineError::InvalidConfig(format!(
                "uniqueness_window ({}) cannot exceed max_per_item ({})",
                self.uniqueness_window, self.max_per_item
            )));
        }
        if self.min_fill > self.max_per_item {
            return Err(EngineError::InvalidConfig(format!(
                "min_fill ({}) cannot exceed max_per_item ({})",
                self.min_fill, self.max_per_item
            )));
        }
        if !(self.relax_threshold > 0.0 && self.relax_threshold <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "relax_threshold ({}) must be in (0, 1]",
                self.relax_threshold
            )));
        }
        Ok(())
    }
}
