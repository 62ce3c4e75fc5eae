//! Generated deck representation

use crate::core::{Card, Leader, Rarity};
use crate::generator::config::RarityCaps;
use serde::{Deserialize, Serialize};

/// A card and how many copies of it the deck holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: Card,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub leader: Leader,
    pub entries: Vec<DeckEntry>,
    /// Size the builder was aiming for
    pub target: u32,
}

impl Deck {
    pub fn new(leader: Leader, target: u32) -> Self {
        Deck {
            leader,
            entries: Vec::new(),
            target,
        }
    }

    /// Total copies across all entries
    pub fn total_cards(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Total copies of one rarity
    pub fn rarity_total(&self, rarity: Rarity) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.card.rarity == rarity)
            .map(|e| e.count)
            .sum()
    }

    /// Totals per rarity, in the shape of a cap table
    pub fn rarity_totals(&self) -> RarityCaps {
        let mut totals = RarityCaps::new(0, 0, 0, 0);
        for rarity in Rarity::ALL {
            totals.set(rarity, self.rarity_total(rarity));
        }
        totals
    }

    pub fn is_complete(&self) -> bool {
        self.total_cards() >= self.target
    }

    /// Slots left unfilled
    pub fn shortfall(&self) -> u32 {
        self.target.saturating_sub(self.total_cards())
    }
}
