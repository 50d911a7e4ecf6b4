//! postMessage protocol spoken with the booking widget frame.
//!
//! ```text
//! widget -> host   salonify-widget-ready
//! host   -> widget widget-theme            { theme }
//! host   -> widget widget-request-height
//! widget -> host   salonify-widget-height  { height }
//! widget -> host   salonify-booking-event  { event, data }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visual theme pushed to the widget. Serialized with camel-cased keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary: String,
    pub primary_hover: String,
    pub primary_light: String,
    pub secondary: String,
    pub text: String,
    pub background: String,
    pub button_text: String,
}

impl Theme {
    /// Salon palette.
    pub fn salon() -> Self {
        Self {
            primary: "#FF8FB2".into(),
            primary_hover: "#FFBDD4".into(),
            primary_light: "#FFF0F7".into(),
            secondary: "#FFBDD4".into(),
            text: "#4A3F45".into(),
            background: "white".into(),
            button_text: "white".into(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::salon()
    }
}

/// Host to widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Outbound {
    #[serde(rename = "widget-theme")]
    Theme { theme: Theme },
    #[serde(rename = "widget-request-height")]
    RequestHeight,
}

impl Outbound {
    pub fn type_name(&self) -> &'static str {
        match self {
            Outbound::Theme { .. } => "widget-theme",
            Outbound::RequestHeight => "widget-request-height",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Application telemetry forwarded by the widget. Only logged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Widget to host. Anything that does not deserialize into one of these
/// variants (unknown `type`, missing `type`, wrong payload shape) is dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Inbound {
    #[serde(rename = "salonify-widget-ready")]
    Ready,
    #[serde(rename = "salonify-widget-height")]
    Height {
        #[serde(default)]
        height: Value,
    },
    #[serde(rename = "salonify-booking-event")]
    BookingEvent(BookingEvent),
}

impl Inbound {
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    /// Height in pixels when the payload carries a usable number.
    pub fn valid_height(&self) -> Option<f64> {
        match self {
            Inbound::Height { height } => height
                .as_f64()
                .filter(|h| h.is_finite() && *h >= 0.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn theme_message_uses_camel_case_keys() {
        let value = serde_json::to_value(Outbound::Theme {
            theme: Theme::salon(),
        })
        .unwrap();
        assert_eq!(
            value,
            json!({
                "type": "widget-theme",
                "theme": {
                    "primary": "#FF8FB2",
                    "primaryHover": "#FFBDD4",
                    "primaryLight": "#FFF0F7",
                    "secondary": "#FFBDD4",
                    "text": "#4A3F45",
                    "background": "white",
                    "buttonText": "white"
                }
            })
        );
    }

    #[test]
    fn height_request_has_no_payload() {
        assert_eq!(
            Outbound::RequestHeight.to_json().unwrap(),
            r#"{"type":"widget-request-height"}"#
        );
    }

    #[test]
    fn parses_known_inbound_types() {
        assert_eq!(
            Inbound::from_json(r#"{"type":"salonify-widget-ready"}"#),
            Some(Inbound::Ready)
        );

        let height = Inbound::from_json(r#"{"type":"salonify-widget-height","height":912}"#)
            .expect("height message");
        assert_eq!(height.valid_height(), Some(912.0));

        let event = Inbound::from_json(
            r#"{"type":"salonify-booking-event","event":"slot-selected","data":{"id":3}}"#,
        );
        match event {
            Some(Inbound::BookingEvent(ev)) => {
                assert_eq!(ev.event, "slot-selected");
                assert_eq!(ev.data, json!({"id": 3}));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn unknown_or_untyped_messages_are_dropped() {
        assert_eq!(Inbound::from_json(r#"{"type":"something-else"}"#), None);
        assert_eq!(Inbound::from_json(r#"{"height":300}"#), None);
        assert_eq!(Inbound::from_json("not json"), None);
        assert_eq!(Inbound::from_value(json!("salonify-widget-ready")), None);
    }

    #[test]
    fn non_numeric_heights_are_not_valid() {
        for payload in [
            json!({"type": "salonify-widget-height", "height": "640"}),
            json!({"type": "salonify-widget-height"}),
            json!({"type": "salonify-widget-height", "height": null}),
            json!({"type": "salonify-widget-height", "height": -5}),
        ] {
            let msg = Inbound::from_value(payload).expect("typed message parses");
            assert_eq!(msg.valid_height(), None);
        }
    }
}
