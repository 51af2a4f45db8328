//! Page handlers module
//!
//! This module contains the language binder and the language picker click
//! handling built on top of it.

pub mod binder;
pub mod menu;

pub use binder::{set_language, startup, BindReport};
pub use menu::{handle_click, ClickOutcome};
