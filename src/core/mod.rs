//! Core card types

pub mod card;
pub mod types;

pub use card::Card;
pub use types::{CardKind, CardName, Class, Leader, Rarity, NEUTRAL_KEY};
