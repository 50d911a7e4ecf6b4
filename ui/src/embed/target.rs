//! Widget URL construction.

use std::fmt;

use url::form_urlencoded;

use super::config::{ConfigField, EmbedConfig};

/// Where on the widget domain the booking widget is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathVariant {
    /// `/widget`
    #[default]
    Primary,
    /// The domain root; tried once when the primary path fails.
    Fallback,
}

impl PathVariant {
    pub fn path(self) -> &'static str {
        match self {
            PathVariant::Primary => "/widget",
            PathVariant::Fallback => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedUrl(String);

impl EmbedUrl {
    /// `{widget_domain}{path}?{query}`; absent values are left out of the query.
    pub fn build(config: &EmbedConfig, variant: PathVariant) -> Self {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for field in ConfigField::ALL {
            if let (Some(key), Some(value)) = (field.query_key(), config.value(field)) {
                query.append_pair(key, value);
            }
        }

        let domain = config.widget_domain.as_deref().unwrap_or_default();
        let domain = domain.strip_suffix('/').unwrap_or(domain);

        Self(format!("{domain}{}?{}", variant.path(), query.finish()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmbedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmbedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
