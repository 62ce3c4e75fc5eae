//! Seeded deck generation
//!
//! [`generate_deck`] ties the pieces together: validate the config, seed the
//! generator from the seed word, draw (or take) the leader, build, sort.

pub mod builder;
pub mod config;
pub mod deck;
pub mod logger;
pub mod presenter;
pub mod rng;

pub use builder::{select_leader, DeckBuilder};
pub use config::{
    ConfigWarning, GeneratorConfig, RarityCaps, SelectionStrategy, DECK_SIZE, MAX_LEADER_WEIGHT,
};
pub use deck::{Deck, DeckEntry};
pub use logger::{GenLogger, LogEntry, OutputMode, VerbosityLevel};
pub use presenter::{render, render_json_batch, sort_entries, DeckFormat};
pub use rng::{seed_digest, DeckRng, RngAlgorithm};

use crate::core::Leader;
use crate::loader::CardPool;
use crate::Result;

/// How the leader is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderChoice {
    /// Drawn from the seeded generator before any card
    #[default]
    Random,
    /// Pinned by the caller; no leader draw is made
    Fixed(Leader),
}

/// Per-call options that are not part of the deck rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateOptions {
    pub leader: LeaderChoice,
    pub algorithm: RngAlgorithm,
}

/// A sorted deck plus what was noticed while making it
#[derive(Debug, Clone)]
pub struct GeneratedDeck {
    pub seed_word: String,
    /// SHA-256 of the seed word, hex
    pub seed_hex: String,
    pub algorithm: RngAlgorithm,
    pub deck: Deck,
    pub warnings: Vec<ConfigWarning>,
}

impl GeneratedDeck {
    pub fn is_complete(&self) -> bool {
        self.deck.is_complete()
    }
}

/// Generate one sorted deck for `seed_word`
///
/// Identical seed words, pools, configs and options always produce
/// identical decks. Config warnings are logged and returned; only an
/// unusable config is an error.
pub fn generate_deck(
    seed_word: &str,
    pool: &CardPool,
    config: &GeneratorConfig,
    options: GenerateOptions,
    logger: &GenLogger,
) -> Result<GeneratedDeck> {
    let builder = DeckBuilder::new(pool, config, logger)?;
    for warning in builder.warnings() {
        logger.warning(&warning.to_string());
    }

    let mut rng = DeckRng::from_seed_word(seed_word, options.algorithm);
    let leader = match options.leader {
        LeaderChoice::Random => select_leader(&mut rng),
        LeaderChoice::Fixed(leader) => leader,
    };
    logger.verbose(&format!(
        "seed '{seed_word}' -> {} ({}), leader {leader}, strategy {}",
        rng.seed_hex(),
        rng.algorithm(),
        config.strategy.name()
    ));

    let mut deck = builder.build(leader, &mut rng);
    sort_entries(&mut deck.entries);

    if !deck.is_complete() {
        logger.warning(&format!(
            "deck stopped at {} of {} cards: no eligible cards left",
            deck.total_cards(),
            deck.target
        ));
    }

    Ok(GeneratedDeck {
        seed_word: seed_word.to_string(),
        seed_hex: rng.seed_hex(),
        algorithm: rng.algorithm(),
        deck,
        warnings: builder.warnings().to_vec(),
    })
}
