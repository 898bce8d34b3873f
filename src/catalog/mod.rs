mod types;

pub use types::{CatalogOption, Category, Complexity, Performance};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("builtin.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("option '{id}' not found in category '{category}'")]
    NotFound { category: Category, id: String },

    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("invalid catalog: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// On-disk catalog layout. Options are a list so declaration order survives.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryEntry {
    name: Category,
    #[serde(default)]
    options: Vec<CatalogOption>,
}

/// Read-only store of categories and their options.
///
/// Built once at start-up and shared by reference afterwards; nothing in the
/// crate mutates it after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: BTreeMap<Category, Vec<CatalogOption>>,
}

impl Catalog {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog document.
    ///
    /// All problems (out-of-range ratings, duplicate ids, repeated
    /// categories) are reported together.
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_saphyr::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut errors = Vec::new();
        let mut categories = BTreeMap::new();

        for entry in file.categories {
            if categories.contains_key(&entry.name) {
                errors.push(format!("categories.{}: listed more than once", entry.name));
                continue;
            }

            let mut seen_ids = HashSet::new();
            for option in &entry.options {
                if !seen_ids.insert(option.id.as_str()) {
                    errors.push(format!(
                        "categories.{}.{}: duplicate option id",
                        entry.name, option.id
                    ));
                }
                for (field, value) in option.ratings() {
                    if !(1..=5).contains(&value) {
                        errors.push(format!(
                            "categories.{}.{}.{}: must be between 1 and 5, got {}",
                            entry.name, option.id, field, value
                        ));
                    }
                }
            }

            categories.insert(entry.name, entry.options);
        }

        if errors.is_empty() {
            Ok(Self { categories })
        } else {
            Err(CatalogError::Invalid(errors))
        }
    }

    /// Categories present in the catalog, in declaration order of `Category`
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    /// Options of a category in insertion order (empty if the category has none)
    pub fn options(&self, category: Category) -> &[CatalogOption] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a single option by id
    pub fn option(&self, category: Category, id: &str) -> Result<&CatalogOption, CatalogError> {
        self.options(category)
            .iter()
            .find(|option| option.id == id)
            .ok_or_else(|| CatalogError::NotFound {
                category,
                id: id.to_string(),
            })
    }
}

/// Load a user catalog from a YAML file
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file at {}", path.display()))?;

    let catalog = Catalog::from_yaml(&content)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

    Ok(catalog)
}
