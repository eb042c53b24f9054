//! Income brackets. Upper bounds are inclusive: 3.0 LPA is LOW, 8.0 LPA is MID.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest LPA value classified as LOW
pub const LOW_CEILING_LPA: f64 = 3.0;

/// Highest LPA value classified as MID
pub const MID_CEILING_LPA: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBracket {
    Low,
    Mid,
    High,
}

impl IncomeBracket {
    /// Classify a canonical LPA value. Zero and negative values are LOW.
    pub fn classify(lpa: f64) -> Self {
        if lpa <= LOW_CEILING_LPA {
            IncomeBracket::Low
        } else if lpa <= MID_CEILING_LPA {
            IncomeBracket::Mid
        } else {
            IncomeBracket::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IncomeBracket::Low => "low",
            IncomeBracket::Mid => "mid",
            IncomeBracket::High => "high",
        }
    }
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
