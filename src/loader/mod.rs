//! Card pack loaders
//!
//! Pack catalog (display name → file) and the JSON card pool

pub mod catalog;
pub mod pool;

pub use catalog::{PackCatalog, PackEntry};
pub use pool::{parse_pack, CardPool, LoadedPack};
