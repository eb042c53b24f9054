//! Income units, canonicalization to LPA and free-text extraction.
//!
//! LPA (lakhs per annum) is the canonical unit. Every recognized unit has a
//! fixed linear factor; what happens to an unrecognized unit word is decided
//! by [`UnitPolicy`], never by the bracket logic.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Number followed by a unit word. Only `lpa` has no plural form.
/// Digits are ASCII so every match parses as f64.
static UNIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)(\s*)(lpa|lakhs?|crores?|thousands?)").unwrap()
});

/// Any decimal number, used when no unit word is present.
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

/// Unit written into the session when the text carried no unit word
pub const DEFAULT_UNIT_WORD: &str = "lpa";

/// Income unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeUnit {
    /// Lakhs per annum (canonical)
    Lpa,
    Thousand,
    Lakh,
    Crore,
}

impl IncomeUnit {
    /// Every unit word the extractor and slot reader accept
    pub const ACCEPTED_WORDS: [&'static str; 7] = [
        "lpa", "lakh", "lakhs", "crore", "crores", "thousand", "thousands",
    ];

    /// Map a unit word to its unit (case-insensitive)
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "lpa" => Some(IncomeUnit::Lpa),
            "lakh" | "lakhs" => Some(IncomeUnit::Lakh),
            "crore" | "crores" => Some(IncomeUnit::Crore),
            "thousand" | "thousands" => Some(IncomeUnit::Thousand),
            _ => None,
        }
    }

    /// Convert an amount in this unit to LPA
    pub fn to_lpa(self, amount: f64) -> f64 {
        match self {
            IncomeUnit::Lpa | IncomeUnit::Lakh => amount,
            IncomeUnit::Thousand => amount / 100.0,
            IncomeUnit::Crore => amount * 100.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IncomeUnit::Lpa => "lpa",
            IncomeUnit::Thousand => "thousand",
            IncomeUnit::Lakh => "lakh",
            IncomeUnit::Crore => "crore",
        }
    }
}

impl fmt::Display for IncomeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a unit word that is not in [`IncomeUnit::ACCEPTED_WORDS`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPolicy {
    /// Treat the raw amount as already in LPA
    #[default]
    AssumeLpa,
    /// Refuse to classify; the turn asks for the income again
    Strict,
}

impl UnitPolicy {
    /// Resolve a user-facing unit word. A missing unit is LPA under every policy.
    pub fn resolve(self, unit: Option<&str>) -> Option<IncomeUnit> {
        let word = match unit.map(str::trim) {
            None | Some("") => return Some(IncomeUnit::Lpa),
            Some(word) => word,
        };

        if let Some(unit) = IncomeUnit::from_word(word) {
            return Some(unit);
        }

        match self {
            UnitPolicy::AssumeLpa => {
                warn!(unit = word, "unrecognized income unit, assuming LPA");
                Some(IncomeUnit::Lpa)
            }
            UnitPolicy::Strict => {
                debug!(unit = word, "unrecognized income unit rejected");
                None
            }
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "assume_lpa" | "lenient" => Some(UnitPolicy::AssumeLpa),
            "strict" => Some(UnitPolicy::Strict),
            _ => None,
        }
    }
}

/// Income as the user stated it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub amount: f64,
    /// Unit word as written, lowercased when extracted from text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Income {
    pub fn new(amount: f64, unit: Option<&str>) -> Self {
        Self {
            amount,
            unit: unit.map(str::to_string),
        }
    }

    /// Unit for display, "LPA" when none was given
    pub fn display_unit(&self) -> &str {
        match self.unit.as_deref() {
            Some(unit) if !unit.trim().is_empty() => unit,
            _ => "LPA",
        }
    }

    /// Canonical LPA value, or None when the policy rejects the unit
    pub fn to_lpa(&self, policy: UnitPolicy) -> Option<f64> {
        policy
            .resolve(self.unit.as_deref())
            .map(|unit| unit.to_lpa(self.amount))
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_amount(self.amount), self.display_unit())
    }
}

/// Render an amount as a float: whole numbers keep one decimal ("2.0").
pub fn format_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() < 1e16 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}

/// First "<number> <unit word>" in reading order.
///
/// The unit word only counts when whitespace separates it from the number;
/// "5crore" is 5 in the default unit.
pub fn extract_with_unit(text: &str) -> Option<Income> {
    let caps = UNIT_PATTERN.captures(text)?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = if caps.get(2).is_some_and(|sep| !sep.as_str().is_empty()) {
        caps.get(3)?.as_str().to_lowercase()
    } else {
        debug!(matched = %caps.get(0)?.as_str(), "unit word attached to number, using default unit");
        DEFAULT_UNIT_WORD.to_string()
    };
    Some(Income {
        amount,
        unit: Some(unit),
    })
}

/// First bare number in reading order, unit defaults to LPA
pub fn extract_bare_number(text: &str) -> Option<Income> {
    let m = BARE_NUMBER.find(text)?;
    let amount: f64 = m.as_str().parse().ok()?;
    Some(Income::new(amount, Some(DEFAULT_UNIT_WORD)))
}
