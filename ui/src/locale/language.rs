use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Nl,
    En,
    Fr,
    Pt,
}

pub const SUPPORTED: [Language; 4] = [Language::Nl, Language::En, Language::Fr, Language::Pt];

/// Used when neither cookie nor Accept-Language name a supported language.
pub const FALLBACK: Language = Language::Nl;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported language `{0}`")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    /// Path prefix and Fluent locale folder.
    pub fn code(self) -> &'static str {
        match self {
            Language::Nl => "nl",
            Language::En => "en",
            Language::Fr => "fr",
            Language::Pt => "pt",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::Nl => "Nederlands",
            Language::En => "English",
            Language::Fr => "Français",
            Language::Pt => "Português",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Language::Nl => "🇳🇱",
            Language::En => "🇬🇧",
            Language::Fr => "🇫🇷",
            Language::Pt => "🇧🇷",
        }
    }

    /// Match a language tag on its primary subtag (`fr-BE` → `Fr`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        SUPPORTED
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(primary))
    }

    /// Exact path-segment match (`nl`, not `nl-BE`).
    pub fn from_code(code: &str) -> Option<Self> {
        SUPPORTED.into_iter().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}
