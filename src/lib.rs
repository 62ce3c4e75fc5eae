//! Seeded deck generator
//!
//! Builds a reproducible 40-card deck from a seed word, a leader and a set
//! of card packs described in JSON.

pub mod core;
pub mod error;
pub mod generator;
pub mod loader;

pub use error::{DeckGenError, Result};
