//! Deck sorting and rendering
//!
//! Sorting never touches the random source: the same entries always come
//! out in the same order, whatever order they were picked in.

use crate::generator::deck::{Deck, DeckEntry};
use crate::{DeckGenError, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write as FmtWrite;
use std::str::FromStr;

/// Display order: cost, neutral before leader, type F < S < A < other, pack
/// order, then rarity and name so that no two distinct cards tie
pub fn compare_entries(a: &DeckEntry, b: &DeckEntry) -> Ordering {
    let (a, b) = (&a.card, &b.card);
    a.cost
        .cmp(&b.cost)
        .then_with(|| a.is_neutral().cmp(&b.is_neutral()).reverse())
        .then_with(|| a.kind.sort_rank().cmp(&b.kind.sort_rank()))
        .then_with(|| a.pack_index.cmp(&b.pack_index))
        .then_with(|| a.rarity.cmp(&b.rarity))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| a.class.cmp(&b.class))
}

pub fn sort_entries(entries: &mut [DeckEntry]) {
    entries.sort_by(compare_entries);
}

/// Output format for a finished deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckFormat {
    /// Leader header, column line, then `cost：name（count）` rows
    #[default]
    Text,
    /// Leader line then `cost：name：count` rows
    Plain,
    /// One JSON object per deck; several decks form a JSON array
    Json,
}

impl FromStr for DeckFormat {
    type Err = DeckGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(DeckFormat::Text),
            "plain" => Ok(DeckFormat::Plain),
            "json" => Ok(DeckFormat::Json),
            _ => Err(DeckGenError::InvalidConfig(format!(
                "unknown format '{s}' (expected: text, plain, json)"
            ))),
        }
    }
}

#[derive(Serialize)]
struct DeckView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed_word: Option<&'a str>,
    leader: &'a str,
    total: u32,
    target: u32,
    cards: Vec<EntryView<'a>>,
}

#[derive(Serialize)]
struct EntryView<'a> {
    cost: i64,
    name: &'a str,
    count: u32,
    rarity: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    class: &'a str,
    pack: &'a str,
}

/// Render one entry as `cost：name（count）`
pub fn format_entry(entry: &DeckEntry) -> String {
    format!("{}：{}（{}）", entry.card.cost, entry.card.name, entry.count)
}

/// Render a deck; entries are printed in their current order
pub fn render(deck: &Deck, format: DeckFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        DeckFormat::Text => {
            let _ = writeln!(out, "リーダー：{}", deck.leader);
            let _ = writeln!(out, "コスト：カード名（枚数）");
            for entry in &deck.entries {
                let _ = writeln!(out, "{}", format_entry(entry));
            }
        }
        DeckFormat::Plain => {
            let _ = writeln!(out, "{}", deck.leader);
            for entry in &deck.entries {
                let _ = writeln!(out, "{}：{}：{}", entry.card.cost, entry.card.name, entry.count);
            }
        }
        DeckFormat::Json => {
            out = serde_json::to_string_pretty(&deck_view(deck, None))?;
            out.push('\n');
        }
    }
    Ok(out)
}

/// Render several seeded decks as one JSON array, each tagged with its seed
pub fn render_json_batch<'a, I>(decks: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a Deck)>,
{
    let views: Vec<DeckView<'a>> = decks
        .into_iter()
        .map(|(seed, deck)| deck_view(deck, Some(seed)))
        .collect();
    let mut out = serde_json::to_string_pretty(&views)?;
    out.push('\n');
    Ok(out)
}

fn deck_view<'a>(deck: &'a Deck, seed_word: Option<&'a str>) -> DeckView<'a> {
    DeckView {
        seed_word,
        leader: deck.leader.key(),
        total: deck.total_cards(),
        target: deck.target,
        cards: deck
            .entries
            .iter()
            .map(|e| EntryView {
                cost: e.card.cost,
                name: e.card.name.as_str(),
                count: e.count,
                rarity: e.card.rarity.as_str(),
                kind: e.card.kind.as_str(),
                class: e.card.class.key(),
                pack: &e.card.pack,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardKind, CardName, Class, Leader, Rarity};

    fn entry(name: &str, cost: i64, class: Class, kind: &str, pack_index: usize) -> DeckEntry {
        DeckEntry {
            card: Card {
                pack: format!("pack{pack_index}.json"),
                pack_index,
                class,
                rarity: Rarity::Bronze,
                cost,
                name: CardName::new(name),
                kind: CardKind::new(kind),
            },
            count: 2,
        }
    }

    fn sample() -> Vec<DeckEntry> {
        let elf = Class::Leader(Leader::Elf);
        vec![
            entry("e", 2, elf, "F", 0),
            entry("d", 1, elf, "A", 1),
            entry("c", 1, elf, "A", 0),
            entry("b", 1, elf, "S", 0),
            entry("a", 1, Class::Neutral, "X", 0),
            entry("f", 1, elf, "Z", 0),
        ]
    }

    #[test]
    fn test_sort_key_order() {
        let mut entries = sample();
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.card.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "f", "e"]);
    }

    #[test]
    fn test_sort_is_order_independent() {
        let mut forward = sample();
        let mut backward = sample();
        backward.reverse();
        sort_entries(&mut forward);
        sort_entries(&mut backward);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_render_text() {
        let mut deck = Deck::new(Leader::Elf, 40);
        deck.entries = vec![entry("フェアリー", 1, Class::Leader(Leader::Elf), "F", 0)];
        let text = render(&deck, DeckFormat::Text).unwrap();
        assert_eq!(text, "リーダー：エルフ\nコスト：カード名（枚数）\n1：フェアリー（2）\n");

        let plain = render(&deck, DeckFormat::Plain).unwrap();
        assert_eq!(plain, "エルフ\n1：フェアリー：2\n");
    }

    #[test]
    fn test_render_json() {
        let mut deck = Deck::new(Leader::Royal, 40);
        deck.entries = vec![entry("x", 3, Class::Neutral, "S", 0)];
        let json = render(&deck, DeckFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["leader"], "ロイヤル");
        assert_eq!(value["total"], 2);
        assert_eq!(value["cards"][0]["type"], "S");
        assert_eq!(value["cards"][0]["class"], "ニュートラル");
        assert!(value.get("seed_word").is_none());
    }

    #[test]
    fn test_render_json_batch() {
        let mut royal = Deck::new(Leader::Royal, 40);
        royal.entries = vec![entry("x", 3, Class::Neutral, "S", 0)];
        let elf = Deck::new(Leader::Elf, 40);

        let json = render_json_batch([("first", &royal), ("second", &elf)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let decks = value.as_array().unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0]["seed_word"], "first");
        assert_eq!(decks[0]["leader"], "ロイヤル");
        assert_eq!(decks[1]["seed_word"], "second");
        assert_eq!(decks[1]["total"], 0);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<DeckFormat>().unwrap(), DeckFormat::Json);
        assert!("yaml".parse::<DeckFormat>().is_err());
    }
}
