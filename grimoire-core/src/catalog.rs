//! JSON spell catalogs.
//!
//! A catalog is the caller's own spell list, stored as
//! `{"spells": [{"name": ..., "level": ..., "description": ..., "higher_levels": ...}]}`.

use crate::spells::SpellEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate spell in catalog: {0}")]
    DuplicateSpell(String),
}

/// A list of spells loaded from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub spells: Vec<SpellEntry>,
}

impl Catalog {
    pub fn new(spells: Vec<SpellEntry>) -> Result<Self, CatalogError> {
        let catalog = Self { spells };
        catalog.check_unique()?;
        Ok(catalog)
    }

    /// Names must be unique, ignoring case, so `find` is unambiguous.
    fn check_unique(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for spell in &self.spells {
            if !seen.insert(spell.name.to_lowercase()) {
                return Err(CatalogError::DuplicateSpell(spell.name.clone()));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.check_unique()?;
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a spell by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&SpellEntry> {
        let name = name.to_lowercase();
        self.spells.iter().find(|s| s.name.to_lowercase() == name)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Load a catalog from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(path = %path.as_ref().display(), spells = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Save the catalog as pretty-printed JSON.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let content = self.to_json()?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            SpellEntry::new("Boule de feu", 3, "8d6 dégâts de feu.")
                .with_higher_levels("+1d6 par niveau d'emplacement"),
            SpellEntry::new("Lumière", 0, "Une lumière vive."),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"{"spells": [{"name": "Trait de feu", "level": 0, "description": "1d10 dégâts de feu."}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.spells[0].higher_levels, None);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = sample();
        assert!(catalog.find("BOULE DE FEU").is_some());
        assert!(catalog.find("Soins").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Catalog::from_json(
            r#"{"spells": [
                {"name": "Soins", "level": 1, "description": "1d8"},
                {"name": "soins", "level": 1, "description": "1d8"}
            ]}"#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateSpell(name)) if name == "soins"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("grimoire.json");

        let catalog = sample();
        catalog.save(&path).await.expect("Save should succeed");
        assert!(path.exists());

        let loaded = Catalog::load(&path).await.expect("Load should succeed");
        assert_eq!(loaded, catalog);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Catalog::load("/nonexistent/grimoire.json").await;
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
