//! Language binder
//!
//! Applies a language to a page: persists it, updates the indicator and the
//! document language, and rewrites every element carrying a translation key.

use tracing::warn;

use crate::dom::Document;
use crate::state::I18nContext;
use crate::utils::logging;

/// Outcome of applying a language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindReport {
    /// Language actually applied
    pub language: String,
    /// Whether the requested code was replaced by the default language
    pub coerced: bool,
    /// Elements whose content was replaced
    pub updated: usize,
    /// Elements left as they were because their key did not resolve
    pub untouched: usize,
}

/// Apply `code` to the page
///
/// Unknown codes fall back to the default language. Elements flagged with the
/// markup attribute receive parsed markup, all others receive literal text.
/// Elements whose key does not resolve keep their current content. Calling
/// this twice with the same code leaves the page as a single call does.
pub fn set_language<D: Document + ?Sized>(context: &mut I18nContext, document: &mut D, code: &str) -> BindReport {
    let (language, coerced) = context.effective_language(code);
    if coerced {
        warn!(requested = code, language = %language, "Language not found, using default");
    }

    context.activate(&language);
    document.set_document_language(&language);

    let dom = context.dom_config();
    if let Some(indicator) = document.element_by_id(&dom.indicator_id) {
        document.set_text_content(indicator, context.language_config().label_for(&language));
    }

    let mut updated = 0;
    let mut untouched = 0;
    for element in document.elements_with_attribute(&dom.key_attribute) {
        let Some(key) = document.attribute(element, &dom.key_attribute) else {
            continue;
        };

        match context.store().resolve(&language, &key).filter(|value| !value.is_empty()) {
            Some(value) => {
                if document.has_attribute(element, &dom.html_attribute) {
                    document.set_inner_html(element, value);
                } else {
                    document.set_text_content(element, value);
                }
                updated += 1;
            }
            None => untouched += 1,
        }
    }

    if let Some(menu) = document.element_by_id(&dom.menu_id) {
        document.remove_class(menu, &dom.menu_open_class);
    }

    logging::log_language_applied(&language, updated, untouched);

    BindReport {
        language,
        coerced,
        updated,
        untouched,
    }
}

/// Apply the persisted (or default) language once the store has loaded
pub fn startup<D: Document + ?Sized>(context: &mut I18nContext, document: &mut D) -> BindReport {
    let language = context.active_language().to_string();
    set_language(context, document, &language)
}
