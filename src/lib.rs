//! site-i18n
//!
//! Localization for the pages of a personal website. The translation table
//! is loaded once (falling back to an embedded English table), elements
//! carrying a `data-i18n` key are rewritten for the chosen language, and the
//! choice is persisted so the next page load re-applies it.

pub mod config;
pub mod dom;
pub mod handlers;
pub mod i18n;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{I18nError, Result};

// Re-export main components for easy access
pub use dom::{Document, MemoryDocument, NodeId};
pub use handlers::{handle_click, set_language, startup, BindReport, ClickOutcome};
pub use i18n::{TranslationStore, TranslationTable};
pub use state::{I18nContext, LanguageStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
