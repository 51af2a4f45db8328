//! site-i18n
//!
//! Renders a localized copy of a page: loads the translation table, applies
//! the persisted language (or the one given as the first argument) and writes
//! the result.

use tracing::info;

use site_i18n::{
    config::Settings,
    handlers::{set_language, startup},
    i18n::TranslationStore,
    state::{FileStorage, I18nContext},
    utils::logging,
    MemoryDocument,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", site_i18n::info());

    info!("Loading translations...");
    let store = TranslationStore::load_from_config(&settings.translations).await;
    info!(origin = ?store.origin(), languages = ?store.languages(), "Translations ready");

    let html = tokio::fs::read_to_string(&settings.page.input).await?;
    let mut document = MemoryDocument::parse(&html)?;

    let storage = FileStorage::new(&settings.storage.path);
    let mut context = I18nContext::from_settings(store, Box::new(storage), &settings);

    let mut report = startup(&mut context, &mut document);
    if let Some(requested) = std::env::args().nth(1) {
        report = set_language(&mut context, &mut document, &requested);
    }

    info!(
        language = %report.language,
        updated = report.updated,
        untouched = report.untouched,
        "Page localized"
    );

    let output = document.to_html();
    match &settings.page.output {
        Some(path) => {
            tokio::fs::write(path, output).await?;
            info!(path = %path, "Localized page written");
        }
        None => println!("{}", output),
    }

    Ok(())
}
