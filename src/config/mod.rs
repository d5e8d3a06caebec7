use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Deployment-time configuration for the tracker.
///
/// The creditor pair, the payer roster, and the accepted year range are
/// deployment parameters, not domain logic; the ledger takes this struct at
/// construction and never hardcodes names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    pub creditors: Vec<String>,
    pub payers: Vec<String>,
    #[serde(default = "TrackerConfig::default_currency")]
    pub currency: String,
    #[serde(default = "TrackerConfig::default_min_year")]
    pub min_year: i32,
    #[serde(default = "TrackerConfig::default_max_year")]
    pub max_year: i32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            creditors: vec!["Fatima".into(), "Nora".into()],
            payers: vec![
                "Abdullah".into(),
                "Ali".into(),
                "Moaad".into(),
                "Aisha".into(),
            ],
            currency: Self::default_currency(),
            min_year: Self::default_min_year(),
            max_year: Self::default_max_year(),
        }
    }
}

impl TrackerConfig {
    pub fn default_currency() -> String {
        "SAR".into()
    }

    pub fn default_min_year() -> i32 {
        2020
    }

    pub fn default_max_year() -> i32 {
        2100
    }

    /// Checks structural invariants: exactly two distinct creditors, a
    /// non-empty roster of distinct payers, and a sane year range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.creditors.len() != 2 {
            return Err(ConfigError::Invalid(format!(
                "expected exactly two creditors, found {}",
                self.creditors.len()
            )));
        }
        if self.creditors[0] == self.creditors[1] {
            return Err(ConfigError::Invalid(
                "creditor names must be distinct".into(),
            ));
        }
        if self.payers.is_empty() {
            return Err(ConfigError::Invalid("payer roster is empty".into()));
        }
        for name in self.creditors.iter().chain(self.payers.iter()) {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("blank party name".into()));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for payer in &self.payers {
            if !seen.insert(payer.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate payer: {payer}")));
            }
        }
        if self.min_year > self.max_year {
            return Err(ConfigError::Invalid(format!(
                "min_year {} exceeds max_year {}",
                self.min_year, self.max_year
            )));
        }
        Ok(())
    }
}

/// Handles disk persistence for [`TrackerConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Resolves the default config location under the platform config dir.
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("debt_tracker").join("config.json")
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config, falling back to defaults when no file exists.
    /// A stored config that fails validation is rejected, not repaired.
    pub fn load(&self) -> Result<TrackerConfig, ConfigError> {
        let config = if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?
        } else {
            TrackerConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &TrackerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = self.config_path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}
