//! Page localization context
//!
//! One context is built per page load once the translation store has
//! settled. It owns the store, the active language and the persisted slot,
//! and is handed to the binder for every language change.

use tracing::{debug, warn};

use crate::config::{DomConfig, LanguageConfig, Settings};
use crate::i18n::TranslationStore;
use super::storage::LanguageStorage;

/// State shared by every binder invocation of a page
#[derive(Debug)]
pub struct I18nContext {
    store: TranslationStore,
    active_language: String,
    storage: Box<dyn LanguageStorage>,
    language: LanguageConfig,
    dom: DomConfig,
}

impl I18nContext {
    /// Create the context, reading the active language from storage
    pub fn new(
        store: TranslationStore,
        storage: Box<dyn LanguageStorage>,
        language: LanguageConfig,
        dom: DomConfig,
    ) -> Self {
        let active_language = storage
            .get(&language.storage_key)
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| language.default_language.clone());

        debug!(language = %active_language, "Active language restored");

        Self {
            store,
            active_language,
            storage,
            language,
            dom,
        }
    }

    /// Create the context from application settings
    pub fn from_settings(store: TranslationStore, storage: Box<dyn LanguageStorage>, settings: &Settings) -> Self {
        Self::new(store, storage, settings.language.clone(), settings.dom.clone())
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub fn active_language(&self) -> &str {
        &self.active_language
    }

    pub fn language_config(&self) -> &LanguageConfig {
        &self.language
    }

    pub fn dom_config(&self) -> &DomConfig {
        &self.dom
    }

    /// Resolve a key for the active language
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.store.resolve(&self.active_language, key)
    }

    /// Language to apply for a requested code
    ///
    /// Returns the code itself when the store has it, otherwise the default
    /// language. The flag tells whether the code was replaced.
    pub fn effective_language(&self, requested: &str) -> (String, bool) {
        if self.store.contains_language(requested) {
            (requested.to_string(), false)
        } else {
            (self.language.default_language.clone(), true)
        }
    }

    /// Make `code` the active language and persist it
    pub(crate) fn activate(&mut self, code: &str) {
        self.active_language = code.to_string();
        if let Err(e) = self.storage.set(&self.language.storage_key, code) {
            warn!(language = code, error = %e, "Failed to persist language");
        }
    }
}
