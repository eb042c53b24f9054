//! Advisor configuration.
//!
//! Config file: ~/.config/yojana/config.toml or /etc/yojana/config.toml.
//! Catalog paths are optional; without them the built-in data is used.

use crate::bundle::BundleSet;
use crate::catalog::SchemeCatalog;
use crate::error::{Result, YojanaError};
use crate::income::UnitPolicy;
use crate::income_resolver::IncomeResolver;
use crate::scheme_resolver::SchemeResolver;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "YOJANA_CONFIG";

/// Data files replacing the built-in content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Scheme catalog TOML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemes: Option<PathBuf>,
    /// Recommendation bundles TOML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundles: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeConfig {
    #[serde(default)]
    pub unit_policy: UnitPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive, overridden by YOJANA_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub income: IncomeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AdvisorConfig {
    /// ~/.config/yojana/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yojana").join("config.toml"))
    }

    /// /etc/yojana/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/yojana/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path
    /// 2. $YOJANA_CONFIG
    /// 3. User config
    /// 4. System config
    /// 5. Defaults
    ///
    /// Returns the config and the file it came from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            return Ok((Self::load_file(&path)?, Some(path)));
        }

        let candidates = Self::user_config_path()
            .into_iter()
            .chain(std::iter::once(Self::system_config_path()));
        for path in candidates {
            if path.exists() {
                return Ok((Self::load_file(&path)?, Some(path)));
            }
        }

        debug!("no config file found, using defaults");
        Ok((Self::default(), None))
    }

    /// Load one file. Relative catalog paths resolve against its directory.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| YojanaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents, &path.display().to_string())?;

        if let Some(base) = path.parent() {
            config.catalog.schemes = config.catalog.schemes.map(|p| rebase(base, p));
            config.catalog.bundles = config.catalog.bundles.map(|p| rebase(base, p));
        }

        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| YojanaError::toml(origin, e))
    }

    /// Set the unit policy from a user-supplied name
    pub fn set_unit_policy(&mut self, value: &str) -> Result<()> {
        self.income.unit_policy =
            UnitPolicy::parse(value).ok_or_else(|| YojanaError::InvalidConfig {
                key: "income.unit_policy".to_string(),
                value: value.to_string(),
            })?;
        Ok(())
    }

    pub fn scheme_catalog(&self) -> Result<SchemeCatalog> {
        match &self.catalog.schemes {
            Some(path) => SchemeCatalog::load(path),
            None => SchemeCatalog::builtin(),
        }
    }

    pub fn bundle_set(&self) -> Result<BundleSet> {
        match &self.catalog.bundles {
            Some(path) => BundleSet::load(path),
            None => BundleSet::builtin(),
        }
    }

    pub fn income_resolver(&self) -> Result<IncomeResolver> {
        Ok(IncomeResolver::new(self.bundle_set()?).with_unit_policy(self.income.unit_policy))
    }

    pub fn scheme_resolver(&self) -> Result<SchemeResolver> {
        Ok(SchemeResolver::new(self.scheme_catalog()?))
    }
}

fn rebase(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}
