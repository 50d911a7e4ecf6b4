//! Site languages and request-level language routing.

mod gate;
mod language;
mod negotiate;

pub use gate::{language_in_path, route, switch_language_path, LocaleDecision, LocaleRequest};
pub use language::{Language, UnsupportedLanguage, FALLBACK, SUPPORTED};
pub use negotiate::{best_match, cookie_value, parse_accept_language};

/// Cookie holding the visitor's last language.
pub const LOCALE_COOKIE: &str = "i18next";
