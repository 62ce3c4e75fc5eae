//! Property tests over arbitrary seed words and cap tables

use deckgen::core::Rarity;
use deckgen::generator::{
    generate_deck, sort_entries, GenLogger, GenerateOptions, GeneratorConfig, RarityCaps,
    SelectionStrategy,
};
use deckgen::loader::{CardPool, PackCatalog};
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

fn pool() -> &'static CardPool {
    static POOL: OnceLock<CardPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_pools");
        CardPool::load(&dir, &PackCatalog::standard().files(), &GenLogger::capturing())
            .expect("fixture packs load")
    })
}

fn strategy_from(kind: u8, rate: f64) -> SelectionStrategy {
    match kind % 3 {
        0 => SelectionStrategy::PoolCoinFlip { neutral_rate: rate },
        1 => SelectionStrategy::WeightedCards {
            leader_weight: rate * 4.0,
        },
        _ => SelectionStrategy::RarityQuota {
            leader_priority: rate,
            quotas: RarityCaps::new(5, 4, 3, 2),
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn same_seed_same_deck(seed in ".{0,24}") {
        let config = GeneratorConfig::default();
        let logger = GenLogger::capturing();
        let a = generate_deck(&seed, pool(), &config, GenerateOptions::default(), &logger).unwrap();
        let b = generate_deck(&seed, pool(), &config, GenerateOptions::default(), &logger).unwrap();
        prop_assert_eq!(a.deck, b.deck);
    }

    #[test]
    fn caps_and_size_hold(
        seed in "[a-z]{1,12}",
        bronze in 0u32..25,
        silver in 0u32..15,
        gold in 0u32..10,
        legend in 0u32..6,
        kind in 0u8..3,
        rate in 0.0f64..=1.0,
    ) {
        let config = GeneratorConfig {
            rarity_caps: RarityCaps::new(bronze, silver, gold, legend),
            strategy: strategy_from(kind, rate),
            deck_size: 40,
        };
        let logger = GenLogger::capturing();
        let generated =
            generate_deck(&seed, pool(), &config, GenerateOptions::default(), &logger).unwrap();
        let deck = &generated.deck;

        prop_assert!(deck.total_cards() <= 40);
        for rarity in Rarity::ALL {
            prop_assert!(deck.rarity_total(rarity) <= config.rarity_caps.get(rarity));
        }

        let ids: HashSet<_> = deck.entries.iter().map(|e| e.card.identity()).collect();
        prop_assert_eq!(ids.len(), deck.entries.len());
        prop_assert!(deck.entries.iter().all(|e| (1..=3).contains(&e.count)));
    }

    #[test]
    fn coin_flip_fills_when_caps_allow(seed in "[a-zA-Z0-9]{1,16}", rate in 0.0f64..=1.0) {
        // neutral cards alone cover every default cap in the fixture packs
        let config = GeneratorConfig {
            strategy: SelectionStrategy::PoolCoinFlip { neutral_rate: rate },
            ..GeneratorConfig::default()
        };
        let logger = GenLogger::capturing();
        let generated =
            generate_deck(&seed, pool(), &config, GenerateOptions::default(), &logger).unwrap();
        prop_assert_eq!(generated.deck.total_cards(), 40);
    }

    #[test]
    fn sorting_ignores_input_order(seed in "[a-z]{1,8}", rotate in 0usize..40) {
        let config = GeneratorConfig::default();
        let logger = GenLogger::capturing();
        let generated =
            generate_deck(&seed, pool(), &config, GenerateOptions::default(), &logger).unwrap();

        let mut shuffled = generated.deck.entries.clone();
        let len = shuffled.len();
        shuffled.rotate_left(rotate % len.max(1));
        shuffled.reverse();
        sort_entries(&mut shuffled);
        prop_assert_eq!(shuffled, generated.deck.entries);
    }
}
