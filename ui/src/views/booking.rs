use dioxus::prelude::*;

use crate::embed::{BookingWidget, EmbedConfig};
use crate::t;

/// Booking page: the embedded widget, configured at build time.
#[component]
pub fn Booking(lng: String) -> Element {
    let config = use_hook(EmbedConfig::from_env);
    tracing::debug!(%lng, "booking page render");

    rsx! {
        section { class: "page page-booking",
            h1 { {t!("booking-title")} }
            BookingWidget { config }
        }
    }
}
