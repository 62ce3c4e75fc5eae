//! Generator configuration
//!
//! Everything that shapes a deck besides the seed word and the pool lives in
//! [`GeneratorConfig`]. It is passed to the builder explicitly and can be
//! read from a JSON file where every field is optional.

use crate::core::Rarity;
use crate::{DeckGenError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Standard deck size
pub const DECK_SIZE: u32 = 40;

/// Maximum copies of a single card in one pick
pub const MAX_COPIES: u32 = 3;

/// Largest accepted leader weight; keeps the summed weights finite
pub const MAX_LEADER_WEIGHT: f64 = 1e6;

/// Per-rarity ceilings on total copies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityCaps {
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
    pub legend: u32,
}

impl RarityCaps {
    pub fn new(bronze: u32, silver: u32, gold: u32, legend: u32) -> Self {
        RarityCaps {
            bronze,
            silver,
            gold,
            legend,
        }
    }

    pub fn get(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Bronze => self.bronze,
            Rarity::Silver => self.silver,
            Rarity::Gold => self.gold,
            Rarity::Legend => self.legend,
        }
    }

    pub fn set(&mut self, rarity: Rarity, value: u32) {
        match rarity {
            Rarity::Bronze => self.bronze = value,
            Rarity::Silver => self.silver = value,
            Rarity::Gold => self.gold = value,
            Rarity::Legend => self.legend = value,
        }
    }

    /// Sum of all four caps, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        Rarity::ALL
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(self.get(*r)))
    }
}

impl Default for RarityCaps {
    fn default() -> Self {
        RarityCaps::new(20, 10, 6, 4)
    }
}

/// Rarity table as written in a config file, any key may be left out
#[derive(Debug, Default, Deserialize)]
struct PartialCaps {
    bronze: Option<u32>,
    silver: Option<u32>,
    gold: Option<u32>,
    legend: Option<u32>,
}

impl PartialCaps {
    fn or(self, base: RarityCaps) -> RarityCaps {
        RarityCaps {
            bronze: self.bronze.unwrap_or(base.bronze),
            silver: self.silver.unwrap_or(base.silver),
            gold: self.gold.unwrap_or(base.gold),
            legend: self.legend.unwrap_or(base.legend),
        }
    }
}

fn default_quotas() -> RarityCaps {
    RarityCaps::new(5, 4, 3, 2)
}

/// Quotas left out of a config file fall back to the quota defaults,
/// not to the cap defaults
fn deserialize_quotas<'de, D>(deserializer: D) -> std::result::Result<RarityCaps, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PartialCaps::deserialize(deserializer)?.or(default_quotas()))
}

/// How the builder chooses the next card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Flip a weighted coin between the neutral and leader pools, then pick
    /// uniformly from the chosen pool. `neutral_rate` is in 0.0..=1.0.
    PoolCoinFlip { neutral_rate: f64 },

    /// Pick from the combined pool with per-card weights: `leader_weight`
    /// for leader cards, 1.0 for neutral cards.
    WeightedCards { leader_weight: f64 },

    /// Fill each rarity with a fixed number of distinct cards, preferring
    /// leader cards with probability `leader_priority`. Every pick gets a
    /// fixed number of copies (3, or 2 for legends).
    RarityQuota {
        leader_priority: f64,
        #[serde(default = "default_quotas", deserialize_with = "deserialize_quotas")]
        quotas: RarityCaps,
    },
}

impl SelectionStrategy {
    pub fn coin_flip() -> Self {
        SelectionStrategy::PoolCoinFlip { neutral_rate: 0.1 }
    }

    pub fn weighted() -> Self {
        SelectionStrategy::WeightedCards { leader_weight: 0.7 }
    }

    pub fn quota() -> Self {
        SelectionStrategy::RarityQuota {
            leader_priority: 0.9,
            quotas: default_quotas(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectionStrategy::PoolCoinFlip { .. } => "coin-flip",
            SelectionStrategy::WeightedCards { .. } => "weighted",
            SelectionStrategy::RarityQuota { .. } => "quota",
        }
    }
}

impl Default for SelectionStrategy {
    fn default() -> Self {
        SelectionStrategy::coin_flip()
    }
}

/// Copies given to each pick under [`SelectionStrategy::RarityQuota`]
pub fn quota_copies(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Legend => 2,
        _ => MAX_COPIES,
    }
}

/// Non-fatal configuration problems, reported before generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Rarity caps can never add up to a full deck
    CapsBelowDeckSize { total: u32, deck_size: u32 },
    /// Quotas (times copies, bounded by caps) can never fill the deck
    QuotaBelowDeckSize { capacity: u32, deck_size: u32 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::CapsBelowDeckSize { total, deck_size } => write!(
                f,
                "rarity caps total {total}, below the deck size of {deck_size}; deck will be short"
            ),
            ConfigWarning::QuotaBelowDeckSize {
                capacity,
                deck_size,
            } => write!(
                f,
                "rarity quotas allow at most {capacity} cards, below the deck size of {deck_size}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rarity_caps: RarityCaps,
    pub strategy: SelectionStrategy,
    pub deck_size: u32,
}

impl GeneratorConfig {
    /// Preset for the per-card weighted strategy
    pub fn weighted_preset() -> Self {
        GeneratorConfig {
            strategy: SelectionStrategy::weighted(),
            ..GeneratorConfig::default()
        }
    }

    /// Preset for the rarity-quota strategy, with caps matching the quotas
    pub fn quota_preset() -> Self {
        GeneratorConfig {
            rarity_caps: RarityCaps::new(15, 12, 9, 4),
            strategy: SelectionStrategy::quota(),
            deck_size: DECK_SIZE,
        }
    }

    /// Read a config from a JSON file; omitted fields take defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check the config before generating
    ///
    /// Values the builder cannot work with are errors. Values that only
    /// make a full deck impossible come back as warnings.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>> {
        if self.deck_size == 0 {
            return Err(DeckGenError::InvalidConfig(
                "deck size must be at least 1".to_string(),
            ));
        }

        match self.strategy {
            SelectionStrategy::PoolCoinFlip { neutral_rate } => {
                check_probability("neutral rate", neutral_rate)?
            }
            SelectionStrategy::WeightedCards { leader_weight } => {
                if !(0.0..=MAX_LEADER_WEIGHT).contains(&leader_weight) {
                    return Err(DeckGenError::InvalidConfig(format!(
                        "leader weight must be in 0..={MAX_LEADER_WEIGHT}, got {leader_weight}"
                    )));
                }
            }
            SelectionStrategy::RarityQuota {
                leader_priority, ..
            } => check_probability("leader priority", leader_priority)?,
        }

        let mut warnings = Vec::new();
        let total = self.rarity_caps.total();
        if total < self.deck_size {
            warnings.push(ConfigWarning::CapsBelowDeckSize {
                total,
                deck_size: self.deck_size,
            });
        }

        if let SelectionStrategy::RarityQuota { quotas, .. } = self.strategy {
            let capacity = Rarity::ALL.iter().fold(0u32, |acc, r| {
                let per_rarity = quotas
                    .get(*r)
                    .saturating_mul(quota_copies(*r))
                    .min(self.rarity_caps.get(*r));
                acc.saturating_add(per_rarity)
            });
            if capacity < self.deck_size && total >= self.deck_size {
                warnings.push(ConfigWarning::QuotaBelowDeckSize {
                    capacity,
                    deck_size: self.deck_size,
                });
            }
        }

        Ok(warnings)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            rarity_caps: RarityCaps::default(),
            strategy: SelectionStrategy::default(),
            deck_size: DECK_SIZE,
        }
    }
}

fn check_probability(what: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DeckGenError::InvalidConfig(format!(
            "{what} must be between 0 and 1, got {p}"
        )))
    }
}
