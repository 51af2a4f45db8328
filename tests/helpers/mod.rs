//! Test helpers module
//!
//! Shared fixtures for the integration tests: a mock translation server,
//! the demo page and translation table, and context builders.

#![allow(dead_code)]

pub mod translation_mock;

pub use translation_mock::*;

use std::sync::Once;

use site_i18n::config::Settings;
use site_i18n::i18n::TranslationStore;
use site_i18n::state::{I18nContext, LanguageStorage, MemoryStorage};
use site_i18n::{Document, MemoryDocument, NodeId};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// Demo page shipped with the repository
pub fn demo_page() -> &'static str {
    include_str!("../../demos/index.html")
}

/// Demo translation table shipped with the repository
pub fn demo_translations() -> &'static str {
    include_str!("../../demos/translations.json")
}

/// Parsed demo page
pub fn demo_document() -> MemoryDocument {
    MemoryDocument::parse(demo_page()).expect("demo page should parse")
}

/// Store holding the demo translation table
pub fn demo_store() -> TranslationStore {
    let table = site_i18n::TranslationTable::from_json_str(demo_translations())
        .expect("demo translations should parse");
    TranslationStore::from_table(table, site_i18n::i18n::TableOrigin::Remote)
}

/// Context over `store` with default settings
pub fn context_with(store: TranslationStore, storage: Box<dyn LanguageStorage>) -> I18nContext {
    I18nContext::from_settings(store, storage, &Settings::default())
}

/// Context over the demo store with empty in-memory storage
pub fn demo_context() -> I18nContext {
    context_with(demo_store(), Box::new(MemoryStorage::new()))
}

/// Element carrying translation key `key`
pub fn element_for_key(document: &MemoryDocument, key: &str) -> NodeId {
    document
        .elements_with_attribute("data-i18n")
        .into_iter()
        .find(|id| document.attribute(*id, "data-i18n").as_deref() == Some(key))
        .unwrap_or_else(|| panic!("no element for key {}", key))
}

/// Language option button for `code`
pub fn option_for(document: &MemoryDocument, code: &str) -> NodeId {
    document
        .elements_with_attribute("data-lang")
        .into_iter()
        .find(|id| document.attribute(*id, "data-lang").as_deref() == Some(code))
        .unwrap_or_else(|| panic!("no option for {}", code))
}
