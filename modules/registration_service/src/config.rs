//! Configuration for the registration service module

use crate::domain::RegistrationDefaults;
use serde::Deserialize;

/// Storage backend selection
///
/// Chosen at process startup from configuration; never inferred from the
/// shape of credentials at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// In-process map store, for development and tests
    Memory,
    /// SeaORM-backed persistent store (Postgres or SQLite)
    Database {
        /// Connection URL, e.g. `postgres://...` or `sqlite::memory:`
        url: String,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Memory
    }
}

/// Registration service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Storage backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Profile completion deadline applied when no requirements row
    /// configures one (days)
    #[serde(default = "default_profile_deadline_days")]
    pub default_profile_deadline_days: i64,

    /// Agreement text shown when the event/type pair has none configured
    #[serde(default = "default_agreement_text")]
    pub default_agreement_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            default_profile_deadline_days: default_profile_deadline_days(),
            default_agreement_text: default_agreement_text(),
        }
    }
}

impl Config {
    /// Domain defaults derived from this configuration
    pub fn defaults(&self) -> RegistrationDefaults {
        RegistrationDefaults {
            agreement_text: self.default_agreement_text.clone(),
            profile_deadline_days: self.default_profile_deadline_days,
        }
    }
}

fn default_profile_deadline_days() -> i64 {
    30
}

fn default_agreement_text() -> String {
    RegistrationDefaults::default().agreement_text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(matches!(config.storage, StorageConfig::Memory));
        assert_eq!(config.default_profile_deadline_days, 30);
        assert!(!config.default_agreement_text.is_empty());
    }

    #[test]
    fn test_storage_backend_from_yaml() {
        let yaml = r#"
storage:
  backend: database
  url: "sqlite::memory:"
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("config should parse");
        match config.storage {
            StorageConfig::Database { url } => assert_eq!(url, "sqlite::memory:"),
            StorageConfig::Memory => panic!("expected database backend"),
        }
    }
}
