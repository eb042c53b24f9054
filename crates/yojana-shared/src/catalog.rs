//! Static scheme catalog and keyword alias table.
//!
//! The catalog maps a canonical scheme key (e.g. "PM-KISAN") to its details
//! document. The alias table is an ordered list: when several keywords occur
//! in a message the one declared first wins, wherever it appears in the text.

use crate::error::{Result, YojanaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_SCHEMES: &str = include_str!("../data/schemes.toml");

/// Details document for one scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRecord {
    /// Canonical key, matched verbatim
    pub key: String,
    /// Human name for listings
    #[serde(default)]
    pub title: String,
    /// Formatted document sent to the user
    pub details: String,
}

/// Free-text keyword pointing at a scheme key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAlias {
    /// Lowercase substring searched in the lowercased message
    pub keyword: String,
    pub scheme: String,
}

impl KeywordAlias {
    pub fn new(keyword: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            scheme: scheme.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    help_examples: Vec<String>,
    #[serde(default)]
    alias: Vec<KeywordAlias>,
    #[serde(default)]
    scheme: Vec<SchemeRecord>,
}

/// Read-only scheme catalog
#[derive(Debug, Clone, Default)]
pub struct SchemeCatalog {
    records: BTreeMap<String, SchemeRecord>,
    aliases: Vec<KeywordAlias>,
    help_examples: Vec<String>,
}

impl SchemeCatalog {
    /// Build a catalog, rejecting duplicate keys and empty keywords.
    /// Keywords are lowercased; alias order is preserved.
    pub fn new(
        records: Vec<SchemeRecord>,
        aliases: Vec<KeywordAlias>,
        help_examples: Vec<String>,
    ) -> Result<Self> {
        let mut by_key = BTreeMap::new();
        for record in records {
            if by_key.contains_key(&record.key) {
                return Err(YojanaError::DuplicateScheme(record.key));
            }
            by_key.insert(record.key.clone(), record);
        }

        let mut normalized = Vec::with_capacity(aliases.len());
        for alias in aliases {
            let keyword = alias.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(YojanaError::EmptyAlias(alias.scheme));
            }
            if !by_key.contains_key(&alias.scheme) {
                debug!(keyword = %keyword, scheme = %alias.scheme, "alias targets a scheme missing from the catalog");
            }
            normalized.push(KeywordAlias {
                keyword,
                scheme: alias.scheme,
            });
        }

        Ok(Self {
            records: by_key,
            aliases: normalized,
            help_examples,
        })
    }

    /// Catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_SCHEMES, "built-in schemes")
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| YojanaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(contents).map_err(|e| YojanaError::toml(origin, e))?;
        Self::new(file.scheme, file.alias, file.help_examples)
    }

    pub fn get(&self, key: &str) -> Option<&SchemeRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn records(&self) -> impl Iterator<Item = &SchemeRecord> {
        self.records.values()
    }

    pub fn aliases(&self) -> &[KeywordAlias] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First alias, in declaration order, contained in the message
    pub fn match_alias(&self, text: &str) -> Option<&KeywordAlias> {
        let lowered = text.to_lowercase();
        self.aliases
            .iter()
            .find(|alias| lowered.contains(alias.keyword.as_str()))
    }

    /// Capability listing sent when no scheme could be resolved
    pub fn not_found_message(&self) -> String {
        if self.help_examples.is_empty() {
            return "I can provide details about major government schemes. Which specific scheme would you like to know about?".to_string();
        }
        format!(
            "I can provide details about {}, and other major schemes. Which specific scheme would you like to know about?",
            self.help_examples.join(", ")
        )
    }
}
