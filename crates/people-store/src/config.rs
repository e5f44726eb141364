//! Reconciler configuration.

use std::fmt;
use std::str::FromStr;

use people_generate::LevelSizes;

/// Slot key holding the serialized forest.
pub const DEFAULT_SLOT_KEY: &str = "local-data";

/// Shape generated when the slot is empty: 2000 top-level records.
pub const DEFAULT_SEED_SIZES: [usize; 1] = [2000];

/// What to do when the slot cannot be read or decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptSlotPolicy {
    /// Log a warning and seed the slot from the generator.
    #[default]
    Regenerate,
    /// Fail initialization.
    Fail,
}

impl fmt::Display for CorruptSlotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptSlotPolicy::Regenerate => write!(f, "regenerate"),
            CorruptSlotPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for CorruptSlotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regenerate" => Ok(CorruptSlotPolicy::Regenerate),
            "fail" => Ok(CorruptSlotPolicy::Fail),
            _ => Err(format!("Unknown corrupt slot policy: {s}")),
        }
    }
}

/// Configuration for [`crate::Reconciler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Slot key in the store.
    pub key: String,
    /// Shape generated when the slot is empty.
    pub seed_sizes: LevelSizes,
    pub on_corrupt: CorruptSlotPolicy,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_SLOT_KEY.to_string(),
            seed_sizes: LevelSizes::new(DEFAULT_SEED_SIZES.to_vec())
                .unwrap_or_default(),
            on_corrupt: CorruptSlotPolicy::default(),
        }
    }
}

impl ReconcilerConfig {
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_seed_sizes(mut self, sizes: LevelSizes) -> Self {
        self.seed_sizes = sizes;
        self
    }

    #[must_use]
    pub fn with_on_corrupt(mut self, policy: CorruptSlotPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }
}
