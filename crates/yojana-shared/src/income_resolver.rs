//! Income resolver: find the user's income, classify it, pick the bundle.
//!
//! Income is taken from the first source in order that yields one:
//! session slots, then "<number> <unit>" in the text, then a bare number.
//! The canonical LPA value is only used for classification; the slot
//! updates carry the amount and unit as the user stated them.

use crate::bracket::IncomeBracket;
use crate::bundle::{format_bundle_text, BundleSet, RecommendationBundle};
use crate::income::{extract_bare_number, extract_with_unit, Income, UnitPolicy};
use crate::turn::{
    MessageEmitter, SlotReader, SlotUpdate, SlotValue, TurnInput, TurnOutcome, SLOT_INCOME_AMOUNT,
    SLOT_INCOME_UNIT,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the working income came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    /// Slots already persisted by the host
    Session,
    /// Number followed by a unit word
    UnitPattern,
    /// Number with no unit word, read as LPA
    BareNumber,
}

impl IncomeSource {
    pub const DEFAULT_ORDER: [IncomeSource; 3] = [
        IncomeSource::Session,
        IncomeSource::UnitPattern,
        IncomeSource::BareNumber,
    ];

    pub fn extract(self, session: Option<&Income>, text: &str) -> Option<Income> {
        match self {
            IncomeSource::Session => session.cloned(),
            IncomeSource::UnitPattern => extract_with_unit(text),
            IncomeSource::BareNumber => extract_bare_number(text),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IncomeSource::Session => "session",
            IncomeSource::UnitPattern => "unit_pattern",
            IncomeSource::BareNumber => "bare_number",
        }
    }
}

/// Result of one income turn
#[derive(Debug, Clone, PartialEq)]
pub enum IncomeResolution {
    /// No income could be derived; ask the user
    NeedsInput,
    Resolved {
        income: Income,
        lpa: f64,
        bracket: IncomeBracket,
        source: IncomeSource,
    },
}

impl IncomeResolution {
    pub fn bracket(&self) -> Option<IncomeBracket> {
        match self {
            IncomeResolution::Resolved { bracket, .. } => Some(*bracket),
            IncomeResolution::NeedsInput => None,
        }
    }
}

/// Read the stated income from session slots. A missing or non-numeric
/// amount means no session income.
pub fn session_income(slots: &dyn SlotReader) -> Option<Income> {
    let amount = slots.get_slot(SLOT_INCOME_AMOUNT)?.as_number()?;
    let unit = slots
        .get_slot(SLOT_INCOME_UNIT)
        .map(|v| v.as_text())
        .filter(|u| !u.trim().is_empty());
    Some(Income { amount, unit })
}

/// Bracket classifier and bundle selector
#[derive(Debug, Clone)]
pub struct IncomeResolver {
    bundles: BundleSet,
    policy: UnitPolicy,
    sources: Vec<IncomeSource>,
}

impl IncomeResolver {
    pub fn new(bundles: BundleSet) -> Self {
        Self {
            bundles,
            policy: UnitPolicy::default(),
            sources: IncomeSource::DEFAULT_ORDER.to_vec(),
        }
    }

    pub fn with_unit_policy(mut self, policy: UnitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the extraction order
    pub fn with_sources(mut self, sources: Vec<IncomeSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn bundles(&self) -> &BundleSet {
        &self.bundles
    }

    pub fn unit_policy(&self) -> UnitPolicy {
        self.policy
    }

    /// Pure resolution from the session income and the latest text
    pub fn resolve(&self, session: Option<&Income>, text: &str) -> IncomeResolution {
        let found = self
            .sources
            .iter()
            .find_map(|source| source.extract(session, text).map(|income| (*source, income)));

        let Some((source, income)) = found else {
            debug!("no income in session or text");
            return IncomeResolution::NeedsInput;
        };

        let Some(lpa) = income.to_lpa(self.policy) else {
            debug!(unit = ?income.unit, "income unit rejected by policy");
            return IncomeResolution::NeedsInput;
        };

        let bracket = IncomeBracket::classify(lpa);
        info!(
            source = source.label(),
            amount = income.amount,
            lpa,
            bracket = bracket.label(),
            "income resolved"
        );

        IncomeResolution::Resolved {
            income,
            lpa,
            bracket,
            source,
        }
    }

    /// Bundle chosen for a resolution
    pub fn bundle_for(&self, resolution: &IncomeResolution) -> Option<&RecommendationBundle> {
        resolution.bracket().map(|b| self.bundles.for_bracket(b))
    }

    /// Message and slot updates for a resolution
    pub fn respond(&self, resolution: &IncomeResolution) -> TurnOutcome {
        match resolution {
            IncomeResolution::NeedsInput => TurnOutcome {
                message: Some(self.bundles.income_prompt.clone()),
                updates: Vec::new(),
            },
            IncomeResolution::Resolved {
                income, bracket, ..
            } => TurnOutcome {
                message: Some(format_bundle_text(
                    self.bundles.for_bracket(*bracket),
                    income,
                )),
                updates: vec![
                    SlotUpdate::set(SLOT_INCOME_AMOUNT, Some(SlotValue::Number(income.amount))),
                    SlotUpdate::set(SLOT_INCOME_UNIT, income.unit.clone().map(SlotValue::Text)),
                ],
            },
        }
    }

    /// Resolve a host turn without emitting
    pub fn outcome(&self, slots: &dyn SlotReader, turn: &TurnInput) -> TurnOutcome {
        let session = session_income(slots);
        let resolution = self.resolve(session.as_ref(), &turn.text);
        self.respond(&resolution)
    }

    /// Host entry point: emit one message, return the slot updates
    pub fn run(
        &self,
        slots: &dyn SlotReader,
        turn: &TurnInput,
        emitter: &mut dyn MessageEmitter,
    ) -> Vec<SlotUpdate> {
        let outcome = self.outcome(slots, turn);
        if let Some(message) = &outcome.message {
            emitter.utter(message);
        }
        outcome.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolver() -> IncomeResolver {
        IncomeResolver::new(BundleSet::builtin().unwrap())
    }

    #[test]
    fn test_session_income_requires_numeric_amount() {
        let mut slots: HashMap<String, SlotValue> = HashMap::new();
        assert!(session_income(&slots).is_none());

        slots.insert(SLOT_INCOME_UNIT.into(), "lakhs".into());
        assert!(session_income(&slots).is_none());

        slots.insert(SLOT_INCOME_AMOUNT.into(), "lots".into());
        assert!(session_income(&slots).is_none());

        slots.insert(SLOT_INCOME_AMOUNT.into(), "4".into());
        assert_eq!(session_income(&slots), Some(Income::new(4.0, Some("lakhs"))));
    }

    #[test]
    fn test_session_blank_unit_is_absent() {
        let mut slots: HashMap<String, SlotValue> = HashMap::new();
        slots.insert(SLOT_INCOME_AMOUNT.into(), SlotValue::Number(6.0));
        slots.insert(SLOT_INCOME_UNIT.into(), " ".into());
        assert_eq!(session_income(&slots), Some(Income::new(6.0, None)));
    }

    #[test]
    fn test_source_recorded() {
        let r = resolver();
        match r.resolve(None, "I earn 10") {
            IncomeResolution::Resolved { source, .. } => {
                assert_eq!(source, IncomeSource::BareNumber)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_custom_sources_without_bare_number() {
        let r = resolver().with_sources(vec![IncomeSource::Session, IncomeSource::UnitPattern]);
        assert_eq!(r.resolve(None, "I earn 10"), IncomeResolution::NeedsInput);
    }

    #[test]
    fn test_strict_policy_rejects_unknown_session_unit() {
        let r = resolver().with_unit_policy(UnitPolicy::Strict);
        let session = Income::new(5.0, Some("rupees"));
        assert_eq!(
            r.resolve(Some(&session), "5 lakhs"),
            IncomeResolution::NeedsInput
        );
    }

    #[test]
    fn test_needs_input_outcome_has_prompt_and_no_updates() {
        let r = resolver();
        let outcome = r.respond(&IncomeResolution::NeedsInput);
        assert!(outcome.updates.is_empty());
        assert!(outcome.message.unwrap().contains("annual income"));
    }
}
