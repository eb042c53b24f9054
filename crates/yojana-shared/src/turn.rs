//! Host contract: what a resolver reads from the conversational runtime and
//! what it hands back.
//!
//! The host owns the session store. Resolvers read slots through
//! [`SlotReader`], send at most one message through [`MessageEmitter`] and
//! return [`SlotUpdate`] directives that the host applies after the turn.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Slot holding the stated income amount
pub const SLOT_INCOME_AMOUNT: &str = "income_amount";

/// Slot holding the stated income unit word
pub const SLOT_INCOME_UNIT: &str = "income_unit";

/// Entity type carrying a recognized scheme key
pub const ENTITY_SCHEME_NAME: &str = "scheme_name";

/// A slot value as stored by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Number(f64),
    Text(String),
}

impl SlotValue {
    /// Numeric view; text is parsed. Unparsable or non-finite values are None.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            SlotValue::Number(n) => *n,
            SlotValue::Text(s) => s.trim().parse().ok()?,
        };
        n.is_finite().then_some(n)
    }

    /// Text view; numbers are rendered
    pub fn as_text(&self) -> String {
        match self {
            SlotValue::Number(n) => n.to_string(),
            SlotValue::Text(s) => s.clone(),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(SlotValue::Number),
            Value::String(s) => Some(SlotValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<f64> for SlotValue {
    fn from(n: f64) -> Self {
        SlotValue::Number(n)
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Text(s.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(s: String) -> Self {
        SlotValue::Text(s)
    }
}

/// Proposed slot change, applied by the host after the turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotUpdate {
    pub slot: String,
    /// None clears the slot
    pub value: Option<SlotValue>,
}

impl SlotUpdate {
    pub fn set(slot: &str, value: Option<SlotValue>) -> Self {
        Self {
            slot: slot.to_string(),
            value,
        }
    }
}

/// Read access to the host's session slots
pub trait SlotReader {
    fn get_slot(&self, name: &str) -> Option<SlotValue>;
}

impl<S: BuildHasher> SlotReader for HashMap<String, SlotValue, S> {
    fn get_slot(&self, name: &str) -> Option<SlotValue> {
        self.get(name).cloned()
    }
}

impl SlotReader for BTreeMap<String, SlotValue> {
    fn get_slot(&self, name: &str) -> Option<SlotValue> {
        self.get(name).cloned()
    }
}

/// Build a slot map from a JSON object, dropping nulls and non-scalar values
pub fn slots_from_json(value: &Value) -> BTreeMap<String, SlotValue> {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| SlotValue::from_json(v).map(|sv| (k.clone(), sv)))
                .collect()
        })
        .unwrap_or_default()
}

/// Entity extracted by the host's recognition stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type tag
    pub entity: String,
    pub value: String,
}

impl Entity {
    pub fn new(entity: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            value: value.into(),
        }
    }
}

/// Latest user message with its recognized entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl TurnInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.push(Entity::new(entity, value));
        self
    }

    /// Parse a host message without failing: a missing or non-array entity
    /// list is empty and malformed entity items are skipped.
    pub fn from_json_lenient(value: &Value) -> Self {
        let text = value
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let entities = value
            .get("entities")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(entity_from_json).collect())
            .unwrap_or_default();

        Self { text, entities }
    }
}

fn entity_from_json(item: &Value) -> Option<Entity> {
    let entity = item.get("entity")?.as_str()?;
    let value = match item.get("value")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(Entity::new(entity, value))
}

/// Outbound message channel; resolvers call it at most once per turn
pub trait MessageEmitter {
    fn utter(&mut self, text: &str);
}

/// Emitter that keeps every message, for hosts that batch and for tests
#[derive(Debug, Clone, Default)]
pub struct CollectingEmitter {
    pub messages: Vec<String>,
}

impl CollectingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl MessageEmitter for CollectingEmitter {
    fn utter(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

/// Everything a turn produced, in host-serializable form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub updates: Vec<SlotUpdate>,
}
