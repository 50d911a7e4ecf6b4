use dioxus::prelude::*;

use crate::embed::{BookingWidget, ConfigField, EmbedConfig, Theme};
use crate::t;

/// Characters of the anon key shown on the diagnostics page.
const KEY_PREVIEW_CHARS: usize = 20;

/// Diagnostics page: the active widget configuration next to a live widget.
#[component]
pub fn WidgetTest(lng: String) -> Element {
    let config = use_hook(EmbedConfig::from_env);
    let theme = Theme::salon();
    let not_set = t!("widget-test-not-set");

    let rows = ConfigField::ALL.map(|field| {
        let shown = match (field, config.value(field)) {
            (_, None) => not_set.clone(),
            (ConfigField::SupabaseKey, Some(key)) => key_preview(key),
            (_, Some(value)) => value.to_string(),
        };
        (field, shown)
    });
    let default_domain = config.uses_default_domain();
    tracing::debug!(%lng, missing = config.missing_fields().len(), "widget test render");

    rsx! {
        section { class: "page page-widget-test",
            div { class: "widget-test__panel",
                h1 { {t!("widget-test-title")} }
                p { {t!("widget-test-intro")} }

                h3 { {t!("widget-test-config-heading")} }
                dl { class: "widget-test__config",
                    for (field, shown) in rows {
                        dt { key: "{field.env_var()}", code { "{field.env_var()}" } }
                        dd { code { "{shown}" } }
                    }
                }

                if default_domain {
                    div { class: "widget-test__notice widget-test__notice--warning",
                        h3 { {t!("widget-test-default-domain-title")} }
                        p { {t!("widget-test-default-domain-body")} }
                        code { "WIDGET_DOMAIN=https://your-widget-domain.com" }
                    }
                }

                div { class: "widget-test__notice",
                    h3 { {t!("widget-test-protocol-title")} }
                    p { {t!("widget-test-protocol-body")} }
                    code { class: "widget-test__flow",
                        "salonify-widget-ready → widget-theme → widget-request-height"
                    }
                    p { class: "widget-test__palette",
                        "Primary: {theme.primary} | Hover: {theme.primary_hover} | Text: {theme.text}"
                    }
                }
            }

            div { class: "widget-test__panel",
                h2 { {t!("widget-test-live-heading")} }
                p { {t!("widget-test-live-body")} }
                BookingWidget { config }
            }
        }
    }
}

/// First characters of a credential followed by an ellipsis.
fn key_preview(key: &str) -> String {
    let head: String = key.chars().take(KEY_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_preview_keeps_twenty_characters() {
        assert_eq!(
            key_preview("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload"),
            "eyJhbGciOiJIUzI1NiIs..."
        );
        assert_eq!(key_preview("short"), "short...");
    }

    #[test]
    fn key_preview_respects_char_boundaries() {
        let key = "é".repeat(30);
        assert_eq!(key_preview(&key).chars().count(), KEY_PREVIEW_CHARS + 3);
    }
}
