//! Recommendation bundles, one per income bracket.
//!
//! Bundles are static content loaded once at start (built-in or from a TOML
//! file) and never mutated. Section and item order is the display order.

use crate::bracket::IncomeBracket;
use crate::error::{Result, YojanaError};
use crate::income::Income;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN_BUNDLES: &str = include_str!("../data/bundles.toml");

/// A category heading with its program names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSection {
    /// Heading exactly as displayed (may carry emoji/markdown)
    pub heading: String,
    pub items: Vec<String>,
}

/// Fixed recommendation text for one bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    /// Follows "With an income of X,"
    pub intro: String,
    pub sections: Vec<BundleSection>,
    /// Closing question
    pub closing: String,
}

impl RecommendationBundle {
    /// All program names in display order
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().map(String::as_str))
    }
}

/// The three bracket bundles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSet {
    pub low: RecommendationBundle,
    pub mid: RecommendationBundle,
    pub high: RecommendationBundle,
    /// Prompt used when no income can be derived
    #[serde(default = "default_income_prompt")]
    pub income_prompt: String,
}

fn default_income_prompt() -> String {
    "To provide personalized scheme recommendations, could you tell me your annual income? (e.g., 2 LPA, 5 lakhs, etc.)".to_string()
}

impl BundleSet {
    /// Bundles compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_BUNDLES, "built-in bundles")
    }

    /// Load bundles from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| YojanaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self> {
        let set: BundleSet =
            toml::from_str(contents).map_err(|e| YojanaError::toml(origin, e))?;
        set.validate()?;
        Ok(set)
    }

    fn validate(&self) -> Result<()> {
        for bracket in [IncomeBracket::Low, IncomeBracket::Mid, IncomeBracket::High] {
            if self.for_bracket(bracket).sections.is_empty() {
                return Err(YojanaError::EmptyBundle(bracket.label().to_string()));
            }
        }
        Ok(())
    }

    pub fn for_bracket(&self, bracket: IncomeBracket) -> &RecommendationBundle {
        match bracket {
            IncomeBracket::Low => &self.low,
            IncomeBracket::Mid => &self.mid,
            IncomeBracket::High => &self.high,
        }
    }
}

/// Render a bundle for the stated (not canonicalized) income
pub fn format_bundle_text(bundle: &RecommendationBundle, income: &Income) -> String {
    let mut out = format!("With an income of {}, {}:\n\n", income, bundle.intro);

    for section in &bundle.sections {
        out.push_str(&section.heading);
        out.push('\n');
        for item in &section.items {
            out.push_str(&format!("• {}\n", item));
        }
        out.push('\n');
    }

    out.push_str(&bundle.closing);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bundles_parse() {
        let set = BundleSet::builtin().unwrap();
        assert!(set.low.items().any(|i| i.starts_with("PM-KISAN")));
        assert!(set.mid.items().any(|i| i.starts_with("Startup India")));
        assert!(set.high.items().any(|i| i.starts_with("MUDRA")));
        assert!(set.income_prompt.contains("annual income"));
    }

    #[test]
    fn test_format_layout() {
        let bundle = RecommendationBundle {
            intro: "here are relevant schemes".to_string(),
            sections: vec![
                BundleSection {
                    heading: "**Housing:**".to_string(),
                    items: vec!["PMAY".to_string()],
                },
                BundleSection {
                    heading: "**Health:**".to_string(),
                    items: vec!["ESI".to_string(), "NPS".to_string()],
                },
            ],
            closing: "Anything else?".to_string(),
        };
        let text = format_bundle_text(&bundle, &Income::new(5.0, Some("lakhs")));
        assert_eq!(
            text,
            "With an income of 5.0 lakhs, here are relevant schemes:\n\n\
             **Housing:**\n• PMAY\n\n\
             **Health:**\n• ESI\n• NPS\n\n\
             Anything else?"
        );
    }

    #[test]
    fn test_empty_bundle_rejected() {
        let toml = r#"
            [low]
            intro = "a"
            closing = "b"
            sections = []

            [mid]
            intro = "a"
            closing = "b"
            [[mid.sections]]
            heading = "h"
            items = ["x"]

            [high]
            intro = "a"
            closing = "b"
            [[high.sections]]
            heading = "h"
            items = ["x"]
        "#;
        let err = BundleSet::from_toml_str(toml, "test").unwrap_err();
        assert!(matches!(err, YojanaError::EmptyBundle(ref b) if b == "low"));
    }
}
