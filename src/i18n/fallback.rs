//! Embedded fallback translations
//!
//! Used whenever the translation resource cannot be loaded, for example when
//! the site is opened straight from disk.

use super::table::{LanguageTree, TranslationTable};

/// Build the embedded default table
pub fn fallback_table() -> TranslationTable {
    TranslationTable::new().with_language("en", english())
}

fn english() -> LanguageTree {
    LanguageTree::new()
        .with_tree(
            "nav",
            LanguageTree::new()
                .with_text("home", "Home")
                .with_text("what", "What?")
                .with_text("platforms", "Platforms"),
        )
        .with_tree(
            "hero",
            LanguageTree::new()
                .with_text("title", "Hello, I'm PatrikLani")
                .with_text("description", "A polish boy passionate about coding and technology.")
                .with_text("cta", "Learn more"),
        )
        .with_tree(
            "what",
            LanguageTree::new()
                .with_text("title", "What is PatrikLani?")
                .with_text(
                    "description",
                    "PatrikLani has been around since 2019, starting with video randomness and gaming on YouTube, \
                     alongside art on DeviantArt. These days, I focus on coding (mainly on GitHub) and technology. \
                     While I still draw, that's under <a href=\"https://liophex.net\" target=\"_blank\" rel=\"noopener\">Liophex</a>, \
                     one of my current identities. PatrikLani is all about the tech side.",
                ),
        )
        .with_tree(
            "lanie",
            LanguageTree::new()
                .with_text("title", "Meet Lanie!")
                .with_text(
                    "description",
                    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut \
                     labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco \
                     laboris nisi ut aliquip ex ea commodo consequat.",
                ),
        )
        .with_tree(
            "platforms",
            LanguageTree::new()
                .with_text("title", "Find me on")
                .with_text("discord", "Join the server"),
        )
        .with_tree(
            "footer",
            LanguageTree::new().with_text("backToTop", "Back to top"),
        )
}
