//! Error types for Yojana.
//!
//! Only configuration and catalog loading can fail. The resolvers degrade to
//! clarification prompts instead of returning errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum YojanaError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error in {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate scheme key: {0}")]
    DuplicateScheme(String),

    #[error("Empty alias keyword for scheme {0}")]
    EmptyAlias(String),

    #[error("Bundle for {0} bracket has no sections")]
    EmptyBundle(String),

    #[error("Invalid config value for {key}: {value}")]
    InvalidConfig { key: String, value: String },
}

impl YojanaError {
    pub fn toml(origin: impl Into<String>, source: toml::de::Error) -> Self {
        YojanaError::Toml {
            origin: origin.into(),
            source,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            YojanaError::Read { .. } => -32006,
            YojanaError::Toml { .. } => -32700,
            YojanaError::DuplicateScheme(_) => -32010,
            YojanaError::EmptyAlias(_) => -32011,
            YojanaError::EmptyBundle(_) => -32012,
            YojanaError::InvalidConfig { .. } => -32602,
        }
    }
}

pub type Result<T> = std::result::Result<T, YojanaError>;
