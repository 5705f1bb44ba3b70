use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::providers::{frankfurter, open_er};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PairConfig {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatesProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoryProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub rates: Option<RatesProviderConfig>,
    pub history: Option<HistoryProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            rates: Some(RatesProviderConfig {
                base_url: open_er::DEFAULT_BASE_URL.to_string(),
            }),
            history: Some(HistoryProviderConfig {
                base_url: frankfurter::DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

/// Application configuration. Every field is optional so the converter
/// works out of the box without a config file.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Startup currency pair. When omitted the pair is derived from the
    /// system timezone.
    pub pair: Option<PairConfig>,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "kurs", "kurs")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "kurs", "kurs")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Base URL for the latest-rates provider.
    pub fn rates_base_url(&self) -> &str {
        self.providers
            .rates
            .as_ref()
            .map(|rates| rates.base_url.as_str())
            .unwrap_or(open_er::DEFAULT_BASE_URL)
    }

    /// Base URL for the history provider.
    pub fn history_base_url(&self) -> &str {
        self.providers
            .history
            .as_ref()
            .map(|history| history.base_url.as_str())
            .unwrap_or(frankfurter::DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  rates:
    base_url: "http://example.com/rates"
  history:
    base_url: "http://example.com/history"
pair:
  from: "USD"
  to: "IDR"
data_path: "/tmp/kurs-test"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.rates_base_url(), "http://example.com/rates");
        assert_eq!(config.history_base_url(), "http://example.com/history");
        let pair = config.pair.expect("Expected a pair");
        assert_eq!(pair.from, "USD");
        assert_eq!(pair.to, "IDR");
        assert_eq!(config.data_path.as_deref(), Some("/tmp/kurs-test"));
    }

    #[test]
    fn test_minimal_config_uses_default_providers() {
        let yaml_str = r#"
pair:
  from: "EUR"
  to: "GBP"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.rates_base_url(), "https://open.er-api.com");
        assert_eq!(config.history_base_url(), "https://api.frankfurter.app");
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_default_config_has_no_pair() {
        let config = AppConfig::default();
        assert!(config.pair.is_none());
        assert_eq!(config.rates_base_url(), "https://open.er-api.com");
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/kurs/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_data_path_override() {
        let config = AppConfig {
            data_path: Some("/custom/path".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/custom/path")
        );
    }
}
