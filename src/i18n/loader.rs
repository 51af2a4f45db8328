//! Translation loader and store
//!
//! This module fetches the translation table once per page load, masks every
//! failure with the embedded fallback table, and answers dotted-key lookups.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tokio::fs;
use tracing::debug;
use url::Url;

use crate::config::TranslationsConfig;
use crate::utils::errors::{I18nError, Result};
use crate::utils::logging;
use super::fallback::fallback_table;
use super::table::TranslationTable;

/// Where the translation document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationSource {
    Http { url: Url },
    File { path: PathBuf },
}

impl TranslationSource {
    /// Derive the source from configuration
    ///
    /// A configured base URL is joined with the resource path; otherwise the
    /// resource path is read from disk.
    pub fn from_config(config: &TranslationsConfig) -> Result<Self> {
        match &config.base_url {
            Some(base) => {
                let mut base = Url::parse(base)?;
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                Ok(TranslationSource::Http { url: base.join(&config.resource_path)? })
            }
            None => Ok(TranslationSource::File { path: PathBuf::from(&config.resource_path) }),
        }
    }

    /// Human readable location for logs
    pub fn describe(&self) -> String {
        match self {
            TranslationSource::Http { url } => url.to_string(),
            TranslationSource::File { path } => path.display().to_string(),
        }
    }

    /// Fetch the raw document
    async fn fetch(&self, timeout: Option<Duration>) -> Result<String> {
        match self {
            TranslationSource::Http { url } => {
                let mut builder = Client::builder().user_agent(concat!("site-i18n/", env!("CARGO_PKG_VERSION")));
                if let Some(timeout) = timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build()?;

                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(I18nError::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                Ok(response.text().await?)
            }
            TranslationSource::File { path } => Ok(fs::read_to_string(path).await?),
        }
    }
}

/// Where the live table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrigin {
    Remote,
    Fallback,
}

/// Live translation table for the current page load
#[derive(Debug, Clone)]
pub struct TranslationStore {
    table: TranslationTable,
    origin: TableOrigin,
}

impl TranslationStore {
    /// Wrap an already built table
    pub fn from_table(table: TranslationTable, origin: TableOrigin) -> Self {
        Self { table, origin }
    }

    /// Store holding only the embedded fallback table
    pub fn fallback() -> Self {
        Self::from_table(fallback_table(), TableOrigin::Fallback)
    }

    /// Load the translation table from `source`
    ///
    /// Never fails: an unreachable resource, a non-success status or
    /// malformed content is logged and replaced by the embedded fallback
    /// table. There is no retry.
    pub async fn load(source: &TranslationSource, timeout: Option<Duration>) -> Self {
        let description = source.describe();
        debug!(source = %description, "Loading translations");

        match Self::try_load(source, timeout).await {
            Ok(table) => {
                let store = Self::from_table(table, TableOrigin::Remote);
                logging::log_table_loaded(&description, store.table.len(), store.stats().total_keys);
                store
            }
            Err(e) => {
                logging::log_fallback_used(&description, &e);
                Self::fallback()
            }
        }
    }

    /// Load using the translation settings
    pub async fn load_from_config(config: &TranslationsConfig) -> Self {
        match TranslationSource::from_config(config) {
            Ok(source) => Self::load(&source, config.timeout_seconds.map(Duration::from_secs)).await,
            Err(e) => {
                logging::log_fallback_used(&config.resource_path, &e);
                Self::fallback()
            }
        }
    }

    async fn try_load(source: &TranslationSource, timeout: Option<Duration>) -> Result<TranslationTable> {
        let content = source.fetch(timeout).await?;
        TranslationTable::from_json_str(&content)
    }

    /// Resolve a dotted key for a language
    pub fn resolve(&self, language: &str, key: &str) -> Option<&str> {
        self.table.resolve(language, key)
    }

    /// Check if a language has translations
    pub fn contains_language(&self, language: &str) -> bool {
        self.table.contains(language)
    }

    /// Loaded language codes, sorted
    pub fn languages(&self) -> Vec<&str> {
        self.table.languages()
    }

    /// Dotted leaf keys of a language
    pub fn keys(&self, language: &str) -> Vec<String> {
        self.table.get(language).map(|tree| tree.keys()).unwrap_or_default()
    }

    pub fn origin(&self) -> TableOrigin {
        self.origin
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Get translation statistics
    pub fn stats(&self) -> TranslationStats {
        let mut languages: Vec<LanguageStats> = self
            .table
            .languages()
            .into_iter()
            .filter_map(|code| {
                self.table.get(code).map(|tree| LanguageStats {
                    code: code.to_string(),
                    key_count: tree.leaf_count(),
                })
            })
            .collect();
        languages.sort_by(|a, b| a.code.cmp(&b.code));

        let total_keys = languages.iter().map(|lang| lang.key_count).sum();
        TranslationStats { languages, total_keys }
    }
}

/// Translation statistics
#[derive(Debug, Clone)]
pub struct TranslationStats {
    pub languages: Vec<LanguageStats>,
    pub total_keys: usize,
}

/// Language-specific statistics
#[derive(Debug, Clone)]
pub struct LanguageStats {
    pub code: String,
    pub key_count: usize,
}
