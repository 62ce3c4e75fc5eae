//! Known card packs and their file names

use crate::{DeckGenError, Result};

/// A pack as shown to the user and as stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub display_name: String,
    pub file_name: String,
}

/// Maps pack display names to pack files
#[derive(Debug, Clone)]
pub struct PackCatalog {
    entries: Vec<PackEntry>,
}

impl PackCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        PackCatalog {
            entries: Vec::new(),
        }
    }

    /// The four packs shipped with the game, oldest first
    pub fn standard() -> Self {
        let mut catalog = PackCatalog::new();
        catalog.add("ベーシック", "basic.json");
        catalog.add("伝説の幕開け", "legends_rise.json");
        catalog.add("インフィニティ・エボルヴ", "infinity_evolved.json");
        catalog.add("絶傑の継承者", "heirs_of_the_omen.json");
        catalog
    }

    pub fn add(&mut self, display_name: impl Into<String>, file_name: impl Into<String>) {
        self.entries.push(PackEntry {
            display_name: display_name.into(),
            file_name: file_name.into(),
        });
    }

    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    /// File names of every pack, in catalog order
    pub fn files(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.file_name.clone()).collect()
    }

    /// Resolve a display name or file name to a file name
    ///
    /// Names outside the catalog are accepted as-is when they look like a
    /// JSON file, so custom packs can be used without registering them.
    pub fn resolve(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.display_name == name || e.file_name == name)
        {
            return Ok(entry.file_name.clone());
        }
        if name.ends_with(".json") {
            return Ok(name.to_string());
        }
        Err(DeckGenError::UnknownPack(name.to_string()))
    }

    /// Resolve a selection, dropping repeats but keeping first-seen order
    pub fn resolve_all(&self, names: &[String]) -> Result<Vec<String>> {
        let mut files: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let file = self.resolve(name)?;
            if !files.contains(&file) {
                files.push(file);
            }
        }
        Ok(files)
    }
}

impl Default for PackCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = PackCatalog::standard();
        assert_eq!(catalog.entries().len(), 4);
        assert_eq!(catalog.files()[0], "basic.json");
        assert_eq!(catalog.files()[3], "heirs_of_the_omen.json");
    }

    #[test]
    fn test_resolve_by_display_or_file() {
        let catalog = PackCatalog::standard();
        assert_eq!(catalog.resolve("伝説の幕開け").unwrap(), "legends_rise.json");
        assert_eq!(catalog.resolve("basic.json").unwrap(), "basic.json");
        assert_eq!(catalog.resolve("custom.json").unwrap(), "custom.json");
        assert!(matches!(
            catalog.resolve("nonexistent"),
            Err(DeckGenError::UnknownPack(_))
        ));
    }

    #[test]
    fn test_resolve_all_dedupes() {
        let catalog = PackCatalog::standard();
        let names = vec![
            "legends_rise.json".to_string(),
            "ベーシック".to_string(),
            "伝説の幕開け".to_string(),
        ];
        let files = catalog.resolve_all(&names).unwrap();
        assert_eq!(files, vec!["legends_rise.json", "basic.json"]);
    }
}
