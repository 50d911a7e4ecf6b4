//! Internationalization (i18n) support for `danahair-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection, asset loading, Fluent formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   nl/danahair_ui.ftl   (fallback/reference)
//!   en/danahair_ui.ftl
//!   fr/danahair_ui.ftl
//!   pt/danahair_ui.ftl
//! ```
//!
//! Folder names are the path prefixes of [`crate::locale::Language`], so the
//! language taken from the URL can be selected directly.
//!
//! Usage in a component:
//! ```ignore
//! use crate::t;
//! crate::i18n::select_language(Language::Fr);
//! let label = t!("nav-booking");
//! ```
//!
//! To add a new locale:
//! 1. Add the variant to `Language` and copy `nl/danahair_ui.ftl` to `i18n/<code>/danahair_ui.ftl`.
//! 2. Translate each message value (keep IDs and variable placeholders identical).
//! 3. Run tests to ensure completeness.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::locale::{Language, FALLBACK};

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro.
/// Examples:
///     t!("nav-home")
///     t!("widget-retry")
///
/// This expands to `fl!(&*LOADER, ...)` keeping callsites short while
/// ensuring all lookups route through the shared loader.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain. `fl!` derives it from the crate name with `_`, so the
/// runtime loader must use the same spelling.
///
/// Fallback file path must be: `i18n/nl/{DOMAIN}.ftl`
const DOMAIN: &str = "danahair_ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK
        .code()
        .parse()
        .expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n from the platform's requested languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!(%err, "failed selecting languages; continuing with fallback");
        }
    });
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()), // Silently ignore invalid tags.
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Select `language` unless it is already the active one. Not a hook; safe
/// to call conditionally.
pub fn select_language(language: Language) {
    init();
    if current_language() == Some(language) {
        return;
    }
    if let Err(err) = set_language(language.code()) {
        tracing::warn!(%err, language = language.code(), "language switch failed");
    }
}

/// Language the loader currently formats with.
pub fn current_language() -> Option<Language> {
    Language::from_code(&LOADER.current_language().language.to_string())
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;
    use crate::locale::SUPPORTED;

    #[test]
    fn every_site_language_is_embedded() {
        let available = available_languages();
        for lang in SUPPORTED {
            assert!(
                available.iter().any(|l| l == lang.code()),
                "missing locale folder for {lang}"
            );
        }
    }

    // Single test: the loader is global, parallel tests would race on it.
    #[test]
    fn language_switching_changes_lookups() {
        init();
        set_language("fr").expect("fr is embedded");
        assert_eq!(current_language(), Some(Language::Fr));
        assert_eq!(fl!(&*LOADER, "nav-home"), "Accueil");

        // Unparseable tags leave the selection alone.
        set_language("not a tag!").expect("ignored");
        assert_eq!(fl!(&*LOADER, "nav-home"), "Accueil");

        select_language(Language::Pt);
        assert_eq!(fl!(&*LOADER, "nav-booking"), "Marcar consulta");

        select_language(Language::Nl);
        assert_eq!(fl!(&*LOADER, "nav-booking"), "Afspraak maken");
    }
}
