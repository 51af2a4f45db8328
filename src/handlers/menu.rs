//! Language picker click handling
//!
//! Routes a click on the page the way the language menu expects it: the
//! toggle opens and closes the menu, language options apply their language,
//! clicks inside the menu are ignored and clicks anywhere else close it.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::state::I18nContext;
use super::binder::{set_language, BindReport};

/// What a click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    MenuToggled { open: bool },
    LanguageSelected(BindReport),
    MenuClosed,
    Ignored,
}

/// Handle a click on `target`
pub fn handle_click<D: Document + ?Sized>(context: &mut I18nContext, document: &mut D, target: NodeId) -> ClickOutcome {
    let dom = context.dom_config().clone();
    let toggle = document.element_by_id(&dom.toggle_id);
    let menu = document.element_by_id(&dom.menu_id);

    if let (Some(toggle), Some(menu)) = (toggle, menu) {
        if document.contains(toggle, target) {
            document.toggle_class(menu, &dom.menu_open_class);
            let open = document.has_class(menu, &dom.menu_open_class);
            debug!(open = open, "Language menu toggled");
            return ClickOutcome::MenuToggled { open };
        }
    }

    if let Some(option) = closest_with_attribute(document, target, &dom.lang_attribute) {
        let code = document.attribute(option, &dom.lang_attribute).unwrap_or_default();
        return ClickOutcome::LanguageSelected(set_language(context, document, &code));
    }

    match (toggle, menu) {
        (Some(_), Some(menu)) if document.contains(menu, target) => ClickOutcome::Ignored,
        (Some(_), Some(menu)) => {
            document.remove_class(menu, &dom.menu_open_class);
            ClickOutcome::MenuClosed
        }
        _ => ClickOutcome::Ignored,
    }
}

fn closest_with_attribute<D: Document + ?Sized>(document: &D, node: NodeId, attribute: &str) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(id) = current {
        if document.has_attribute(id, attribute) {
            return Some(id);
        }
        current = document.parent(id);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::config::Settings;
    use crate::dom::MemoryDocument;
    use crate::i18n::TranslationStore;
    use crate::state::MemoryStorage;

    const PAGE: &str = r#"<body>
<button id="langToggle"><span id="currentLang">EN</span></button>
<div id="langMenu" class="lang-menu">
<p class="hint">Choose</p>
<button class="lang-option" data-lang="en"><b>English</b></button>
<button class="lang-option" data-lang="de">Deutsch</button>
<button class="lang-option" data-lang>Broken</button>
</div>
<main id="content">text</main>
</body>"#;

    fn setup() -> (I18nContext, MemoryDocument) {
        let context = I18nContext::from_settings(
            TranslationStore::fallback(),
            Box::new(MemoryStorage::new()),
            &Settings::default(),
        );
        (context, MemoryDocument::parse(PAGE).unwrap())
    }

    fn menu_open(document: &MemoryDocument) -> bool {
        let menu = document.element_by_id("langMenu").unwrap();
        document.has_class(menu, "lang-menu--open")
    }

    #[test]
    fn test_toggle_opens_and_closes() {
        let (mut context, mut document) = setup();
        let indicator = document.element_by_id("currentLang").unwrap();

        assert_eq!(handle_click(&mut context, &mut document, indicator), ClickOutcome::MenuToggled { open: true });
        assert!(menu_open(&document));
        assert_eq!(handle_click(&mut context, &mut document, indicator), ClickOutcome::MenuToggled { open: false });
        assert!(!menu_open(&document));
    }

    #[test]
    fn test_click_inside_menu_keeps_it_open() {
        let (mut context, mut document) = setup();
        let toggle = document.element_by_id("langToggle").unwrap();
        handle_click(&mut context, &mut document, toggle);

        let menu = document.element_by_id("langMenu").unwrap();
        let hint = document.child_elements_named(menu, "p")[0];
        assert_eq!(handle_click(&mut context, &mut document, hint), ClickOutcome::Ignored);
        assert!(menu_open(&document));
    }

    #[test]
    fn test_click_outside_closes_menu() {
        let (mut context, mut document) = setup();
        let toggle = document.element_by_id("langToggle").unwrap();
        handle_click(&mut context, &mut document, toggle);

        let content = document.element_by_id("content").unwrap();
        assert_eq!(handle_click(&mut context, &mut document, content), ClickOutcome::MenuClosed);
        assert!(!menu_open(&document));
    }

    #[test]
    fn test_option_click_selects_language() {
        let (mut context, mut document) = setup();
        let toggle = document.element_by_id("langToggle").unwrap();
        handle_click(&mut context, &mut document, toggle);

        let english = document.elements_with_attribute("data-lang")[0];
        let label = document.child_elements_named(english, "b")[0];
        let outcome = handle_click(&mut context, &mut document, label);

        assert_matches!(outcome, ClickOutcome::LanguageSelected(BindReport { ref language, coerced: false, .. }) if language == "en");
        assert!(!menu_open(&document));
    }

    #[test]
    fn test_option_for_unloaded_language_falls_back() {
        let (mut context, mut document) = setup();
        let options = document.elements_with_attribute("data-lang");

        assert_matches!(
            handle_click(&mut context, &mut document, options[1]),
            ClickOutcome::LanguageSelected(BindReport { coerced: true, .. })
        );
        assert_matches!(
            handle_click(&mut context, &mut document, options[2]),
            ClickOutcome::LanguageSelected(BindReport { coerced: true, .. })
        );
        assert_eq!(context.active_language(), "en");
    }

    #[test]
    fn test_page_without_menu() {
        let (mut context, _) = setup();
        let mut document = MemoryDocument::parse("<p id=\"x\">plain</p>").unwrap();
        let p = document.element_by_id("x").unwrap();
        assert_eq!(handle_click(&mut context, &mut document, p), ClickOutcome::Ignored);
    }
}
