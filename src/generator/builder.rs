//! Deck builder
//!
//! Turns a card pool, a leader and a [`GeneratorConfig`] into a deck using a
//! caller-supplied random source. Every strategy keeps three invariants:
//!
//! - a rarity never exceeds its cap
//! - the deck never exceeds its target size
//! - a card is picked at most once (its count carries the copies)
//!
//! Running out of eligible cards ends the build early with a partial deck.

use crate::core::{Card, Class, Leader, Rarity};
use crate::generator::config::{
    quota_copies, ConfigWarning, GeneratorConfig, RarityCaps, SelectionStrategy, MAX_COPIES,
};
use crate::generator::deck::{Deck, DeckEntry};
use crate::generator::{GenLogger, VerbosityLevel};
use crate::loader::CardPool;
use crate::Result;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Draw a leader uniformly from [`Leader::ALL`]
pub fn select_leader<R: Rng + ?Sized>(rng: &mut R) -> Leader {
    Leader::ALL[rng.gen_range(0..Leader::ALL.len())]
}

/// Running totals while a deck is being filled
struct BuildState {
    deck: Deck,
    caps: RarityCaps,
    totals: RarityCaps,
    total: u32,
}

impl BuildState {
    fn new(leader: Leader, config: &GeneratorConfig) -> Self {
        BuildState {
            deck: Deck::new(leader, config.deck_size),
            caps: config.rarity_caps,
            totals: RarityCaps::new(0, 0, 0, 0),
            total: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.total >= self.deck.target
    }

    fn remaining_slots(&self) -> u32 {
        self.deck.target.saturating_sub(self.total)
    }

    fn rarity_budget(&self, rarity: Rarity) -> u32 {
        self.caps.get(rarity).saturating_sub(self.totals.get(rarity))
    }

    fn is_eligible(&self, card: &Card) -> bool {
        self.rarity_budget(card.rarity) > 0
    }

    /// Clamp a wanted number of copies to what the deck and rarity allow
    fn clamp(&self, rarity: Rarity, wanted: u32) -> u32 {
        wanted
            .min(self.remaining_slots())
            .min(self.rarity_budget(rarity))
    }

    fn add(&mut self, card: &Card, count: u32) {
        self.total += count;
        self.totals.set(card.rarity, self.totals.get(card.rarity) + count);
        self.deck.entries.push(DeckEntry {
            card: card.clone(),
            count,
        });
    }
}

/// Indices of cards whose rarity still has budget
fn eligible_indices(cards: &[&Card], state: &BuildState) -> Vec<usize> {
    cards
        .iter()
        .enumerate()
        .filter(|(_, c)| state.is_eligible(c))
        .map(|(i, _)| i)
        .collect()
}

/// Builds decks from one pool under one configuration
pub struct DeckBuilder<'a> {
    pool: &'a CardPool,
    config: &'a GeneratorConfig,
    logger: &'a GenLogger,
    warnings: Vec<ConfigWarning>,
}

impl<'a> DeckBuilder<'a> {
    /// Validate the config and prepare a builder
    ///
    /// Config warnings do not stop the builder; they are kept for the caller
    /// in [`DeckBuilder::warnings`].
    pub fn new(
        pool: &'a CardPool,
        config: &'a GeneratorConfig,
        logger: &'a GenLogger,
    ) -> Result<Self> {
        let warnings = config.validate()?;
        Ok(DeckBuilder {
            pool,
            config,
            logger,
            warnings,
        })
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    /// Fill a deck for `leader`, in pick order (unsorted)
    pub fn build<R: Rng + ?Sized>(&self, leader: Leader, rng: &mut R) -> Deck {
        let mut state = BuildState::new(leader, self.config);
        match self.config.strategy {
            SelectionStrategy::PoolCoinFlip { neutral_rate } => {
                self.fill_coin_flip(&mut state, neutral_rate, rng)
            }
            SelectionStrategy::WeightedCards { leader_weight } => {
                self.fill_weighted(&mut state, leader_weight, rng)
            }
            SelectionStrategy::RarityQuota {
                leader_priority,
                quotas,
            } => self.fill_quota(&mut state, leader_priority, quotas, rng),
        }
        state.deck
    }

    fn log_pick(&self, card: &Card, count: u32, state: &BuildState) {
        if !self.logger.enabled(VerbosityLevel::Verbose) {
            return;
        }
        self.logger.pick(&format!(
            "pick {} [{} {} {}] x{} ({}/{})",
            card.name,
            card.class,
            card.rarity,
            card.pack,
            count,
            state.total,
            state.deck.target
        ));
    }

    fn fill_coin_flip<R: Rng + ?Sized>(
        &self,
        state: &mut BuildState,
        neutral_rate: f64,
        rng: &mut R,
    ) {
        let mut leader_cards = self.pool.cards_for(Class::Leader(state.deck.leader));
        let mut neutral_cards = self.pool.cards_for(Class::Neutral);

        while !state.is_full() {
            let (first, second) = if rng.gen_bool(neutral_rate) {
                (&mut neutral_cards, &mut leader_cards)
            } else {
                (&mut leader_cards, &mut neutral_cards)
            };

            let mut side = first;
            let mut eligible = eligible_indices(side.as_slice(), state);
            if eligible.is_empty() {
                side = second;
                eligible = eligible_indices(side.as_slice(), state);
            }
            if eligible.is_empty() {
                break;
            }

            let card = side.remove(eligible[rng.gen_range(0..eligible.len())]);
            let count = state.clamp(card.rarity, rng.gen_range(1..=MAX_COPIES));
            state.add(card, count);
            self.log_pick(card, count, state);
        }
    }

    fn fill_weighted<R: Rng + ?Sized>(
        &self,
        state: &mut BuildState,
        leader_weight: f64,
        rng: &mut R,
    ) {
        let leader = Class::Leader(state.deck.leader);
        let mut cards = self.pool.cards_for_classes(&[leader, Class::Neutral]);
        let weight = |card: &Card| if card.class == leader { leader_weight } else { 1.0 };

        while !state.is_full() && !cards.is_empty() {
            let eligible: Vec<usize> = eligible_indices(&cards, state)
                .into_iter()
                .filter(|&i| weight(cards[i]) > 0.0)
                .collect();
            let Ok(dist) = WeightedIndex::new(eligible.iter().map(|&i| weight(cards[i]))) else {
                break;
            };

            let card = cards.remove(eligible[dist.sample(rng)]);
            let count = state.clamp(card.rarity, rng.gen_range(1..=MAX_COPIES));
            state.add(card, count);
            self.log_pick(card, count, state);
        }
    }

    fn fill_quota<R: Rng + ?Sized>(
        &self,
        state: &mut BuildState,
        leader_priority: f64,
        quotas: RarityCaps,
        rng: &mut R,
    ) {
        let leader = Class::Leader(state.deck.leader);
        let leader_pool = self.pool.cards_for(leader);
        let neutral_pool = self.pool.cards_for(Class::Neutral);

        for rarity in Rarity::ALL {
            let mut leader_cards: Vec<&Card> =
                leader_pool.iter().copied().filter(|c| c.rarity == rarity).collect();
            let mut neutral_cards: Vec<&Card> =
                neutral_pool.iter().copied().filter(|c| c.rarity == rarity).collect();

            let mut picked = 0;
            while picked < quotas.get(rarity) {
                if state.is_full() {
                    return;
                }
                if state.rarity_budget(rarity) == 0 {
                    break;
                }

                let take_leader = !leader_cards.is_empty()
                    && (neutral_cards.is_empty() || rng.gen::<f64>() < leader_priority);
                let side = if take_leader {
                    &mut leader_cards
                } else if !neutral_cards.is_empty() {
                    &mut neutral_cards
                } else {
                    break;
                };

                let card = side.remove(rng.gen_range(0..side.len()));
                let count = state.clamp(rarity, quota_copies(rarity));
                state.add(card, count);
                self.log_pick(card, count, state);
                picked += 1;
            }
        }
    }
}
