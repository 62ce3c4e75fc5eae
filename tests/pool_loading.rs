//! Pool loading tests
//!
//! Loads the fixture packs in `test_pools/` through the standard catalog.

use deckgen::core::{Class, Leader, Rarity};
use deckgen::generator::GenLogger;
use deckgen::loader::{parse_pack, CardPool, PackCatalog};
use deckgen::{DeckGenError, Result};
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_pools")
}

#[test]
fn test_load_standard_selection() -> Result<()> {
    let logger = GenLogger::capturing();
    let files = PackCatalog::standard().files();
    let pool = CardPool::load(&fixture_dir(), &files, &logger)?;

    // basic and legends_rise exist, the two newer packs do not
    assert_eq!(pool.packs().len(), 2);
    assert_eq!(pool.selection().len(), 4);
    assert_eq!(pool.len(), 101 + 79);

    let warnings = logger.warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("infinity_evolved.json"));
    assert!(warnings[1].contains("heirs_of_the_omen.json"));
    Ok(())
}

#[test]
fn test_class_partition() -> Result<()> {
    let logger = GenLogger::capturing();
    let files = vec!["basic.json".to_string(), "legends_rise.json".to_string()];
    let pool = CardPool::load(&fixture_dir(), &files, &logger)?;

    let neutral = pool.cards_for(Class::Neutral);
    assert_eq!(neutral.len(), 24 + 16);
    for rarity in Rarity::ALL {
        let count = neutral.iter().filter(|c| c.rarity == rarity).count();
        let expected = match rarity {
            Rarity::Bronze => 20,
            Rarity::Silver => 10,
            Rarity::Gold => 6,
            Rarity::Legend => 4,
        };
        assert_eq!(count, expected, "neutral {rarity}");
    }

    for leader in Leader::ALL {
        let cards = pool.cards_for(Class::Leader(leader));
        assert_eq!(cards.len(), 11 + 9, "{leader}");
        assert!(cards.iter().all(|c| c.class == Class::Leader(leader)));
        // basic.json cards come before legends_rise.json cards
        assert!(cards.windows(2).all(|w| w[0].pack_index <= w[1].pack_index));
    }
    Ok(())
}

#[test]
fn test_legacy_fields() -> Result<()> {
    let logger = GenLogger::capturing();
    let pool = CardPool::load(&fixture_dir(), &["basic.json".to_string()], &logger)?;

    let neutral = pool.cards_for(Class::Neutral);
    // cost written as a string
    assert_eq!(neutral[0].cost, 2);

    // type written under the misspelled key
    let elf_silver = pool
        .cards_for(Class::Leader(Leader::Elf))
        .into_iter()
        .find(|c| c.rarity == Rarity::Silver)
        .map(|c| c.kind.as_str().to_string());
    assert_eq!(elf_silver.as_deref(), Some("S"));

    // both keys present: the correct spelling wins
    let content = r#"{ "エルフ": { "bronze": [
        { "cost": 1, "name": "a", "type": "S", "tyoe": "S" },
        { "cost": 1, "name": "b", "type": "A", "tyoe": "S" },
        { "cost": 1, "name": "c", "tyoe": "A" }
    ] } }"#;
    let pack = parse_pack("cleaned.json", 0, content, &logger)?;
    let kinds: Vec<&str> = pack.cards.iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(kinds, vec!["S", "A", "A"]);
    Ok(())
}

#[test]
fn test_pack_order_follows_selection() -> Result<()> {
    let logger = GenLogger::capturing();
    let catalog = PackCatalog::standard();
    let files = catalog.resolve_all(&["伝説の幕開け".to_string(), "ベーシック".to_string()])?;
    let pool = CardPool::load(&fixture_dir(), &files, &logger)?;

    assert_eq!(pool.packs()[0].file, "legends_rise.json");
    assert!(pool.packs()[0].cards.iter().all(|c| c.pack_index == 0));
    assert!(pool.packs()[1].cards.iter().all(|c| c.pack_index == 1));
    Ok(())
}

#[test]
fn test_unknown_pack_name() {
    let catalog = PackCatalog::standard();
    let result = catalog.resolve_all(&["存在しないパック".to_string()]);
    assert!(matches!(result, Err(DeckGenError::UnknownPack(_))));
}
