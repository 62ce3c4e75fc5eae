//! Card records loaded from pack files

use crate::core::{CardKind, CardName, Class, Rarity};
use serde::{Deserialize, Serialize};

/// One card as listed in a pack file
///
/// Cards are immutable once loaded. Two cards are the same card when pack,
/// class, rarity and name all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Pack file the card was read from (e.g. "basic.json")
    pub pack: String,

    /// Position of the pack in the selected pack list
    pub pack_index: usize,

    /// Leader the card belongs to, or neutral
    pub class: Class,

    pub rarity: Rarity,

    /// Play point cost
    pub cost: i64,

    pub name: CardName,

    /// Type code, "F" when the pack omits it
    pub kind: CardKind,
}

impl Card {
    pub fn is_neutral(&self) -> bool {
        self.class.is_neutral()
    }

    /// Identity tuple used to detect duplicate picks
    pub fn identity(&self) -> (&str, Class, Rarity, &str) {
        (&self.pack, self.class, self.rarity, self.name.as_str())
    }
}
