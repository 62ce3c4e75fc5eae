//! Card pool loader (pack JSON files)
//!
//! A pack file is a JSON object keyed by class (a leader name or
//! `ニュートラル`). Each class maps rarity names to arrays of cards:
//!
//! ```json
//! { "エルフ": { "bronze": [ { "cost": 1, "name": "フェアリー", "type": "F" } ] } }
//! ```
//!
//! Document order is kept all the way through, since the builder draws by
//! index and any reordering would change every seeded deck.

use crate::core::{Card, CardKind, CardName, Class, Rarity};
use crate::generator::GenLogger;
use crate::{DeckGenError, Result};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Card object as written in a pack file
#[derive(Debug, Deserialize)]
struct RawCard {
    cost: RawCost,
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    /// Misspelled key found in some packs; `type` wins when both are present
    #[serde(default)]
    tyoe: Option<String>,
}

impl RawCard {
    fn kind(&mut self) -> Option<String> {
        self.kind.take().or_else(|| self.tyoe.take())
    }
}

/// Costs appear both as numbers and as numeric strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCost {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawCost {
    fn to_cost(&self) -> Option<i64> {
        match self {
            RawCost::Int(n) => Some(*n),
            RawCost::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            RawCost::Float(_) => None,
            RawCost::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// All cards from one pack file
#[derive(Debug, Clone)]
pub struct LoadedPack {
    pub file: String,
    /// Cards in document order
    pub cards: Vec<Card>,
}

/// Every pack that was loaded, in selection order
///
/// The pool is read-only once loaded and can serve any number of
/// generations.
#[derive(Debug, Clone, Default)]
pub struct CardPool {
    packs: Vec<LoadedPack>,
    /// Selected pack files, including ones that failed to load
    selection: Vec<String>,
}

impl CardPool {
    /// Create an empty pool
    pub fn new() -> Self {
        CardPool::default()
    }

    /// Load the selected pack files from a directory
    ///
    /// Missing files are skipped with a warning. Any other I/O failure or a
    /// malformed pack is an error.
    pub fn load(dir: &Path, files: &[String], logger: &GenLogger) -> Result<Self> {
        let mut pool = CardPool::new();
        for file in files {
            let path = dir.join(file);
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    pool.selection.push(file.clone());
                    logger.warning(&format!("pack file not found: {}", path.display()));
                    continue;
                }
                Err(e) => return Err(DeckGenError::Io(e)),
            };
            pool.add_pack_json(file, &content, logger)?;
        }
        logger.normal(&format!(
            "Loaded {} cards from {} of {} packs",
            pool.len(),
            pool.packs.len(),
            pool.selection.len()
        ));
        Ok(pool)
    }

    /// Parse one pack and append it to the pool
    pub fn add_pack_json(&mut self, file: &str, content: &str, logger: &GenLogger) -> Result<()> {
        let pack_index = self.selection.len();
        let pack = parse_pack(file, pack_index, content, logger)?;
        self.selection.push(file.to_string());
        self.packs.push(pack);
        Ok(())
    }

    pub fn packs(&self) -> &[LoadedPack] {
        &self.packs
    }

    /// Selected pack files in order, whether or not they loaded
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Cards of one class across all packs, in pack then document order
    pub fn cards_for(&self, class: Class) -> Vec<&Card> {
        self.cards_for_classes(&[class])
    }

    /// Cards of several classes, grouped per pack: within each pack the
    /// classes come in the order given, each in document order
    pub fn cards_for_classes(&self, classes: &[Class]) -> Vec<&Card> {
        self.packs
            .iter()
            .flat_map(|p| {
                classes
                    .iter()
                    .flat_map(move |class| p.cards.iter().filter(move |c| c.class == *class))
            })
            .collect()
    }

    /// Total number of cards across all packs
    pub fn len(&self) -> usize {
        self.packs.iter().map(|p| p.cards.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a single pack file's content
pub fn parse_pack(
    file: &str,
    pack_index: usize,
    content: &str,
    logger: &GenLogger,
) -> Result<LoadedPack> {
    let root: Value = serde_json::from_str(content)?;
    let classes = root.as_object().ok_or_else(|| {
        DeckGenError::InvalidPoolFormat(format!("{file}: top level must be an object"))
    })?;

    let mut cards = Vec::new();
    // A card listed twice could be picked twice; keep the first listing
    let mut seen: FxHashSet<(Class, Rarity, String)> = FxHashSet::default();
    for (class_key, by_rarity) in classes {
        let Some(class) = Class::from_key(class_key) else {
            logger.warning(&format!("{file}: unknown class '{class_key}' skipped"));
            continue;
        };
        let by_rarity = by_rarity.as_object().ok_or_else(|| {
            DeckGenError::InvalidPoolFormat(format!(
                "{file}: '{class_key}' must map rarities to card lists"
            ))
        })?;

        for (rarity_key, list) in by_rarity {
            let Ok(rarity) = rarity_key.parse::<Rarity>() else {
                logger.warning(&format!(
                    "{file}: unknown rarity '{rarity_key}' under '{class_key}' skipped"
                ));
                continue;
            };
            let raw_cards: Vec<RawCard> =
                serde_json::from_value(list.clone()).map_err(|e| {
                    DeckGenError::InvalidPoolFormat(format!(
                        "{file}: {class_key}/{rarity_key}: {e}"
                    ))
                })?;

            for mut raw in raw_cards {
                let cost = raw.cost.to_cost().ok_or_else(|| {
                    DeckGenError::InvalidPoolFormat(format!(
                        "{file}: card '{}' has a non-integer cost",
                        raw.name
                    ))
                })?;
                if !seen.insert((class, rarity, raw.name.clone())) {
                    logger.warning(&format!(
                        "{file}: duplicate card '{}' under {class_key}/{rarity_key} skipped",
                        raw.name
                    ));
                    continue;
                }
                let kind = raw.kind().map(CardKind::new).unwrap_or_default();
                cards.push(Card {
                    pack: file.to_string(),
                    pack_index,
                    class,
                    rarity,
                    cost,
                    name: CardName::new(raw.name),
                    kind,
                });
            }
        }
    }

    Ok(LoadedPack {
        file: file.to_string(),
        cards,
    })
}
