//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub translations: TranslationsConfig,
    pub language: LanguageConfig,
    pub dom: DomConfig,
    pub storage: StorageConfig,
    pub page: PageConfig,
    pub logging: LoggingConfig,
}

/// Where the translation table is fetched from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationsConfig {
    /// Site origin; when unset the resource is read from disk
    pub base_url: Option<String>,
    /// Relative path of the translation document
    pub resource_path: String,
    pub timeout_seconds: Option<u64>,
}

/// Language selection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageConfig {
    pub default_language: String,
    /// Name of the persisted slot holding the active language
    pub storage_key: String,
    /// Indicator labels by language code
    pub labels: BTreeMap<String, String>,
    pub default_label: String,
}

/// Attribute names and element ids the binder works with
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomConfig {
    pub key_attribute: String,
    pub html_attribute: String,
    pub lang_attribute: String,
    pub indicator_id: String,
    pub toggle_id: String,
    pub menu_id: String,
    pub menu_open_class: String,
}

/// Persisted language slot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: String,
}

/// Page rendering configuration for the binary
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    pub input: String,
    /// Output file; stdout when unset
    pub output: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
    /// Directory for the daily log file; no file logging when unset
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SITE_I18N").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::I18nError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let labels = [("en", "EN"), ("pl", "PL"), ("lt", "LT"), ("ru", "RU"), ("de", "DE")]
            .into_iter()
            .map(|(code, label)| (code.to_string(), label.to_string()))
            .collect();

        Self {
            translations: TranslationsConfig {
                base_url: None,
                resource_path: "translations.json".to_string(),
                timeout_seconds: None,
            },
            language: LanguageConfig {
                default_language: "en".to_string(),
                storage_key: "lang".to_string(),
                labels,
                default_label: "EN".to_string(),
            },
            dom: DomConfig::default(),
            storage: StorageConfig {
                path: "site-i18n-storage.json".to_string(),
            },
            page: PageConfig {
                input: "index.html".to_string(),
                output: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            key_attribute: "data-i18n".to_string(),
            html_attribute: "data-i18n-html".to_string(),
            lang_attribute: "data-lang".to_string(),
            indicator_id: "currentLang".to_string(),
            toggle_id: "langToggle".to_string(),
            menu_id: "langMenu".to_string(),
            menu_open_class: "lang-menu--open".to_string(),
        }
    }
}

impl LanguageConfig {
    /// Indicator label for a language code
    pub fn label_for(&self, code: &str) -> &str {
        self.labels
            .get(code)
            .map(String::as_str)
            .unwrap_or(&self.default_label)
    }
}
