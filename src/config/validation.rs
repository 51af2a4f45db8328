//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use regex::Regex;

use crate::utils::errors::{I18nError, Result};
use super::Settings;

/// Language codes such as "en", "pl" or "pt-BR"
const LANGUAGE_CODE_PATTERN: &str = r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$";

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_translations_config(&settings.translations)?;
    validate_language_config(&settings.language)?;
    validate_dom_config(&settings.dom)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Check that a string looks like a language code
pub fn is_valid_language_code(code: &str) -> bool {
    match Regex::new(LANGUAGE_CODE_PATTERN) {
        Ok(re) => re.is_match(code),
        Err(_) => false,
    }
}

/// Validate translation resource configuration
fn validate_translations_config(config: &super::TranslationsConfig) -> Result<()> {
    if config.resource_path.is_empty() {
        return Err(I18nError::Config(
            "Translation resource path is required".to_string()
        ));
    }

    if let Some(base_url) = &config.base_url {
        url::Url::parse(base_url).map_err(|e| {
            I18nError::Config(format!("Invalid translations base URL {}: {}", base_url, e))
        })?;
    }

    if config.timeout_seconds == Some(0) {
        return Err(I18nError::Config(
            "Translation timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate language selection configuration
fn validate_language_config(config: &super::LanguageConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(I18nError::Config(
            "Default language is required".to_string()
        ));
    }

    if !is_valid_language_code(&config.default_language) {
        return Err(I18nError::Config(
            format!("Invalid default language code: {}", config.default_language)
        ));
    }

    if config.storage_key.is_empty() {
        return Err(I18nError::Config(
            "Language storage key is required".to_string()
        ));
    }

    if let Some(code) = config.labels.keys().find(|code| !is_valid_language_code(code)) {
        return Err(I18nError::Config(
            format!("Invalid language code in labels: {}", code)
        ));
    }

    Ok(())
}

/// Validate attribute names and element ids
fn validate_dom_config(config: &super::DomConfig) -> Result<()> {
    let required = [
        ("key_attribute", &config.key_attribute),
        ("html_attribute", &config.html_attribute),
        ("lang_attribute", &config.lang_attribute),
        ("indicator_id", &config.indicator_id),
        ("toggle_id", &config.toggle_id),
        ("menu_id", &config.menu_id),
        ("menu_open_class", &config.menu_open_class),
    ];

    for (name, value) in required {
        if value.is_empty() {
            return Err(I18nError::Config(format!("dom.{} is required", name)));
        }
    }

    if config.key_attribute == config.html_attribute {
        return Err(I18nError::Config(
            "Translation key and markup flag attributes must differ".to_string()
        ));
    }

    Ok(())
}

/// Validate persisted slot configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.path.is_empty() {
        return Err(I18nError::Config(
            "Language storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(I18nError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(I18nError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(I18nError::Config(
            format!("Invalid log format: {}. Valid formats: {:?}", config.format, valid_formats)
        ));
    }

    Ok(())
}
