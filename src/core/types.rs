//! Strongly-typed wrappers for deck concepts
//!
//! Pack files name leaders, rarities and type codes with bare strings. These
//! types keep them apart so a rarity can never be passed where a leader is
//! expected.

use crate::{DeckGenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pack-file key for cards usable by every leader
pub const NEUTRAL_KEY: &str = "ニュートラル";

/// Card name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

/// Single-letter card type code ("F", "S", "A", ...)
///
/// Unknown codes are kept verbatim and sort after the known ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKind(String);

impl CardKind {
    pub fn new(s: impl Into<String>) -> Self {
        CardKind(s.into())
    }

    /// Follower, the default when a card omits its type
    pub fn follower() -> Self {
        CardKind("F".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display rank: F < S < A < anything else
    pub fn sort_rank(&self) -> u8 {
        match self.0.as_str() {
            "F" => 0,
            "S" => 1,
            "A" => 2,
            _ => 3,
        }
    }
}

impl Default for CardKind {
    fn default() -> Self {
        CardKind::follower()
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardKind {
    fn from(s: &str) -> Self {
        CardKind(s.to_string())
    }
}

/// Card rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Bronze,
    Silver,
    Gold,
    Legend,
}

impl Rarity {
    /// All rarities, lowest first
    pub const ALL: [Rarity; 4] = [Rarity::Bronze, Rarity::Silver, Rarity::Gold, Rarity::Legend];

    /// Position in [`Rarity::ALL`], used to index per-rarity arrays
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Bronze => "bronze",
            Rarity::Silver => "silver",
            Rarity::Gold => "gold",
            Rarity::Legend => "legend",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = DeckGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bronze" => Ok(Rarity::Bronze),
            "silver" => Ok(Rarity::Silver),
            "gold" => Ok(Rarity::Gold),
            "legend" => Ok(Rarity::Legend),
            _ => Err(DeckGenError::InvalidPoolFormat(format!(
                "unknown rarity '{s}'"
            ))),
        }
    }
}

/// Playable leaders (factions)
///
/// The declaration order is the order leaders are drawn from, so it must not
/// change without changing every seeded deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Leader {
    #[serde(rename = "エルフ")]
    Elf,
    #[serde(rename = "ロイヤル")]
    Royal,
    #[serde(rename = "ウィッチ")]
    Witch,
    #[serde(rename = "ドラゴン")]
    Dragon,
    #[serde(rename = "ナイトメア")]
    Nightmare,
    #[serde(rename = "ビショップ")]
    Bishop,
    #[serde(rename = "ネメシス")]
    Nemesis,
}

impl Leader {
    pub const ALL: [Leader; 7] = [
        Leader::Elf,
        Leader::Royal,
        Leader::Witch,
        Leader::Dragon,
        Leader::Nightmare,
        Leader::Bishop,
        Leader::Nemesis,
    ];

    /// Key used for this leader in pack files (also the display name)
    pub fn key(self) -> &'static str {
        match self {
            Leader::Elf => "エルフ",
            Leader::Royal => "ロイヤル",
            Leader::Witch => "ウィッチ",
            Leader::Dragon => "ドラゴン",
            Leader::Nightmare => "ナイトメア",
            Leader::Bishop => "ビショップ",
            Leader::Nemesis => "ネメシス",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Leader::Elf => "elf",
            Leader::Royal => "royal",
            Leader::Witch => "witch",
            Leader::Dragon => "dragon",
            Leader::Nightmare => "nightmare",
            Leader::Bishop => "bishop",
            Leader::Nemesis => "nemesis",
        }
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Leader {
    type Err = DeckGenError;

    /// Accepts either the pack-file key or the English name
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Leader::ALL
            .into_iter()
            .find(|l| l.key() == s.trim() || l.english_name() == lower)
            .ok_or_else(|| DeckGenError::UnknownLeader(s.to_string()))
    }
}

/// Which side of the pool a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Class {
    Neutral,
    Leader(Leader),
}

impl Class {
    pub fn is_neutral(self) -> bool {
        matches!(self, Class::Neutral)
    }

    /// Key used for this class in pack files
    pub fn key(self) -> &'static str {
        match self {
            Class::Neutral => NEUTRAL_KEY,
            Class::Leader(leader) => leader.key(),
        }
    }

    /// Resolve a pack-file key; `None` for keys that are neither
    pub fn from_key(key: &str) -> Option<Self> {
        if key == NEUTRAL_KEY {
            return Some(Class::Neutral);
        }
        Leader::ALL
            .into_iter()
            .find(|l| l.key() == key)
            .map(Class::Leader)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
