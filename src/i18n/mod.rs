//! Internationalization module
//!
//! This module handles the translation table of the site: loading it from
//! the translation resource, the embedded fallback, and dotted-key lookups.

pub mod fallback;
pub mod loader;
pub mod table;

// Re-export commonly used i18n components
pub use fallback::fallback_table;
pub use loader::{TranslationStore, TranslationSource, TableOrigin, TranslationStats, LanguageStats};
pub use table::{LanguageTree, TranslationNode, TranslationTable};
