//! Booking widget configuration.
//!
//! All values are optional on their own; the coordinator refuses to load the
//! frame until every [`ConfigField`] is present. Values are passed in
//! explicitly (no process-wide globals); [`EmbedConfig::from_env`] picks the
//! loader for the target and is what the pages use.

use thiserror::Error;
use url::Url;

/// Widget deployment used when `WIDGET_DOMAIN` is not set.
pub const DEFAULT_WIDGET_DOMAIN: &str = "https://booking-widget-nine.vercel.app";

/// One required configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    CompanyId,
    SupabaseUrl,
    SupabaseKey,
    WidgetDomain,
}

impl ConfigField {
    /// Declaration order; also the order missing fields are reported in.
    pub const ALL: [ConfigField; 4] = [
        ConfigField::CompanyId,
        ConfigField::SupabaseUrl,
        ConfigField::SupabaseKey,
        ConfigField::WidgetDomain,
    ];

    /// Environment variable the value is read from.
    pub fn env_var(self) -> &'static str {
        match self {
            ConfigField::CompanyId => "COMPANY_ID",
            ConfigField::SupabaseUrl => "SUPABASE_URL",
            ConfigField::SupabaseKey => "SUPABASE_ANON_KEY",
            ConfigField::WidgetDomain => "WIDGET_DOMAIN",
        }
    }

    /// Query parameter name on the widget URL (the domain is not a parameter).
    pub fn query_key(self) -> Option<&'static str> {
        match self {
            ConfigField::CompanyId => Some("companyId"),
            ConfigField::SupabaseUrl => Some("supabaseUrl"),
            ConfigField::SupabaseKey => Some("supabaseKey"),
            ConfigField::WidgetDomain => None,
        }
    }
}

/// Which inbound message origins the widget view forwards to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginPolicy {
    /// Only messages whose origin equals the origin of the widget domain.
    #[default]
    TargetDomain,
    /// Every message, whatever its origin.
    Any,
}

impl OriginPolicy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "target" | "strict" => Some(Self::TargetDomain),
            "any" | "*" => Some(Self::Any),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("booking widget is missing configuration: {0:?}")]
    Missing(Vec<ConfigField>),
    #[error("widget domain `{domain}` is not a valid URL: {reason}")]
    InvalidDomain { domain: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbedConfig {
    pub company_id: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub widget_domain: Option<String>,
    pub origin_policy: OriginPolicy,
}

impl EmbedConfig {
    pub fn with_company_id(mut self, value: impl Into<String>) -> Self {
        self.company_id = present(value.into());
        self
    }

    pub fn with_supabase_url(mut self, value: impl Into<String>) -> Self {
        self.supabase_url = present(value.into());
        self
    }

    pub fn with_supabase_key(mut self, value: impl Into<String>) -> Self {
        self.supabase_key = present(value.into());
        self
    }

    pub fn with_widget_domain(mut self, value: impl Into<String>) -> Self {
        self.widget_domain = present(value.into());
        self
    }

    pub fn with_origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }

    /// Build a config from an arbitrary key lookup. Blank values count as
    /// absent; a missing domain falls back to [`DEFAULT_WIDGET_DOMAIN`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |field: ConfigField| lookup(field.env_var()).and_then(present);
        Self {
            company_id: read(ConfigField::CompanyId),
            supabase_url: read(ConfigField::SupabaseUrl),
            supabase_key: read(ConfigField::SupabaseKey),
            widget_domain: Some(
                read(ConfigField::WidgetDomain).unwrap_or_else(|| DEFAULT_WIDGET_DOMAIN.to_string()),
            ),
            origin_policy: lookup("WIDGET_ORIGIN_POLICY")
                .and_then(|raw| OriginPolicy::parse(&raw))
                .unwrap_or_default(),
        }
    }

    /// Values baked in when the bundle was compiled (the only option on wasm).
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "COMPANY_ID" => option_env!("COMPANY_ID"),
                "SUPABASE_URL" => option_env!("SUPABASE_URL"),
                "SUPABASE_ANON_KEY" => option_env!("SUPABASE_ANON_KEY"),
                "WIDGET_DOMAIN" => option_env!("WIDGET_DOMAIN"),
                "WIDGET_ORIGIN_POLICY" => option_env!("WIDGET_ORIGIN_POLICY"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Values read from the running process (desktop builds).
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build-time values in the browser, the process environment elsewhere.
    pub fn from_env() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::from_build_env()
        } else {
            Self::from_process_env()
        }
    }

    pub fn value(&self, field: ConfigField) -> Option<&str> {
        match field {
            ConfigField::CompanyId => self.company_id.as_deref(),
            ConfigField::SupabaseUrl => self.supabase_url.as_deref(),
            ConfigField::SupabaseKey => self.supabase_key.as_deref(),
            ConfigField::WidgetDomain => self.widget_domain.as_deref(),
        }
    }

    /// Absent required fields, in [`ConfigField::ALL`] order.
    pub fn missing_fields(&self) -> Vec<ConfigField> {
        ConfigField::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_none())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }

    pub fn uses_default_domain(&self) -> bool {
        self.widget_domain.as_deref() == Some(DEFAULT_WIDGET_DOMAIN)
    }

    /// Serialized origin (`scheme://host[:port]`) of the widget domain.
    pub fn widget_origin(&self) -> Result<String, ConfigError> {
        let domain = self
            .widget_domain
            .as_deref()
            .ok_or_else(|| ConfigError::Missing(vec![ConfigField::WidgetDomain]))?;
        let parsed = Url::parse(domain).map_err(|err| ConfigError::InvalidDomain {
            domain: domain.to_string(),
            reason: err.to_string(),
        })?;
        Ok(parsed.origin().ascii_serialization())
    }

    /// Whether a message from `origin` may act on the coordinator.
    pub fn accepts_origin(&self, origin: &str) -> bool {
        match self.origin_policy {
            OriginPolicy::Any => true,
            OriginPolicy::TargetDomain => match self.widget_origin() {
                Ok(expected) => expected == origin.trim_end_matches('/'),
                Err(_) => false,
            },
        }
    }
}

fn present(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn lookup_applies_default_domain() {
        let config = EmbedConfig::from_lookup(lookup_from(&[("COMPANY_ID", "co_1")]));
        assert_eq!(config.company_id.as_deref(), Some("co_1"));
        assert!(config.uses_default_domain());
        assert_eq!(
            config.missing_fields(),
            vec![ConfigField::SupabaseUrl, ConfigField::SupabaseKey]
        );
    }

    // Only test in this binary that touches the process environment.
    #[test]
    fn native_builds_read_the_process_environment() {
        std::env::set_var("COMPANY_ID", "co_env");
        std::env::set_var("SUPABASE_URL", "https://env.example");
        std::env::set_var("SUPABASE_ANON_KEY", " ");
        std::env::remove_var("WIDGET_DOMAIN");

        let config = EmbedConfig::from_env();
        assert_eq!(config, EmbedConfig::from_process_env());
        assert_eq!(config.value(ConfigField::CompanyId), Some("co_env"));
        assert_eq!(config.value(ConfigField::SupabaseUrl), Some("https://env.example"));
        assert!(config.uses_default_domain());
        assert_eq!(config.missing_fields(), vec![ConfigField::SupabaseKey]);

        for key in ["COMPANY_ID", "SUPABASE_URL", "SUPABASE_ANON_KEY"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = EmbedConfig::default()
            .with_company_id("   ")
            .with_supabase_url("https://x")
            .with_supabase_key("")
            .with_widget_domain("https://widget.example");
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing(vec![
                ConfigField::CompanyId,
                ConfigField::SupabaseKey
            ]))
        );
    }

    #[test]
    fn origin_policy_is_read_from_lookup() {
        let config = EmbedConfig::from_lookup(lookup_from(&[("WIDGET_ORIGIN_POLICY", "any")]));
        assert_eq!(config.origin_policy, OriginPolicy::Any);
        assert!(config.accepts_origin("https://elsewhere.example"));
    }

    #[test]
    fn strict_policy_only_accepts_widget_origin() {
        let config = EmbedConfig::default().with_widget_domain("https://widget.example/");
        assert!(config.accepts_origin("https://widget.example"));
        assert!(!config.accepts_origin("https://evil.example"));
        assert!(!config.accepts_origin("http://widget.example"));
    }

    #[test]
    fn unparseable_domain_rejects_every_origin() {
        let config = EmbedConfig::default().with_widget_domain("not a url");
        assert!(matches!(
            config.widget_origin(),
            Err(ConfigError::InvalidDomain { .. })
        ));
        assert!(!config.accepts_origin("https://widget.example"));
    }
}
