//! Scheme resolver: map a turn to a scheme details document.
//!
//! A `scheme_name` entity from the recognition stage always takes precedence
//! over keyword matching, even when the text contains a different alias. The
//! first source that yields a candidate key decides the outcome: a candidate
//! missing from the catalog is NotFound, there is no retry with later sources.

use crate::catalog::{SchemeCatalog, SchemeRecord};
use crate::turn::{
    Entity, MessageEmitter, SlotUpdate, TurnInput, TurnOutcome, ENTITY_SCHEME_NAME,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeSource {
    /// First `scheme_name` entity, used verbatim
    Entity,
    /// First declared alias found in the lowercased text
    Keyword,
}

impl SchemeSource {
    pub const DEFAULT_ORDER: [SchemeSource; 2] = [SchemeSource::Entity, SchemeSource::Keyword];

    pub fn extract(self, entities: &[Entity], text: &str, catalog: &SchemeCatalog) -> Option<String> {
        match self {
            SchemeSource::Entity => entities
                .iter()
                .find(|e| e.entity == ENTITY_SCHEME_NAME)
                .map(|e| e.value.clone())
                .filter(|v| !v.is_empty()),
            SchemeSource::Keyword => catalog.match_alias(text).map(|alias| {
                debug!(keyword = %alias.keyword, scheme = %alias.scheme, "alias matched");
                alias.scheme.clone()
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SchemeSource::Entity => "entity",
            SchemeSource::Keyword => "keyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemeResolution<'a> {
    Found {
        record: &'a SchemeRecord,
        source: SchemeSource,
    },
    /// No candidate, or a candidate absent from the catalog
    NotFound { candidate: Option<String> },
}

impl SchemeResolution<'_> {
    pub fn key(&self) -> Option<&str> {
        match self {
            SchemeResolution::Found { record, .. } => Some(record.key.as_str()),
            SchemeResolution::NotFound { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchemeResolver {
    catalog: SchemeCatalog,
    sources: Vec<SchemeSource>,
}

impl SchemeResolver {
    pub fn new(catalog: SchemeCatalog) -> Self {
        Self {
            catalog,
            sources: SchemeSource::DEFAULT_ORDER.to_vec(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<SchemeSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    pub fn resolve(&self, entities: &[Entity], text: &str) -> SchemeResolution<'_> {
        let found = self.sources.iter().find_map(|source| {
            source
                .extract(entities, text, &self.catalog)
                .map(|key| (*source, key))
        });

        let Some((source, key)) = found else {
            debug!("no scheme candidate in entities or text");
            return SchemeResolution::NotFound { candidate: None };
        };

        match self.catalog.get(&key) {
            Some(record) => {
                info!(scheme = %record.key, source = source.label(), "scheme resolved");
                SchemeResolution::Found { record, source }
            }
            None => {
                debug!(candidate = %key, source = source.label(), "candidate not in catalog");
                SchemeResolution::NotFound {
                    candidate: Some(key),
                }
            }
        }
    }

    pub fn respond(&self, resolution: &SchemeResolution<'_>) -> TurnOutcome {
        let message = match resolution {
            SchemeResolution::Found { record, .. } => record.details.clone(),
            SchemeResolution::NotFound { .. } => self.catalog.not_found_message(),
        };
        TurnOutcome {
            message: Some(message),
            updates: Vec::new(),
        }
    }

    pub fn outcome(&self, turn: &TurnInput) -> TurnOutcome {
        let resolution = self.resolve(&turn.entities, &turn.text);
        self.respond(&resolution)
    }

    /// Host entry point: emit the document or the help prompt. Never sets slots.
    pub fn run(&self, turn: &TurnInput, emitter: &mut dyn MessageEmitter) -> Vec<SlotUpdate> {
        let outcome = self.outcome(turn);
        if let Some(message) = &outcome.message {
            emitter.utter(message);
        }
        outcome.updates
    }
}
