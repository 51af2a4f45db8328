//! State management module
//!
//! This module holds the per-page localization context and the persisted
//! language slot.

pub mod context;
pub mod storage;

// Re-export commonly used state components
pub use context::I18nContext;
pub use storage::{LanguageStorage, MemoryStorage, FileStorage};
