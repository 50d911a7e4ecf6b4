use dioxus::prelude::*;

use crate::core::platform;
use crate::locale::{route, LocaleDecision, LocaleRequest};
use crate::t;

/// Resolves a path that no language route matched: redirect it to a
/// language-prefixed location, or report it as gone or missing.
#[component]
pub fn LocaleGate(path: String) -> Element {
    let hints = use_hook(platform::locale_hints);

    let decision = route(&LocaleRequest {
        path: &path,
        query: &hints.query,
        fragment: &hints.fragment,
        cookie: hints.cookie.as_deref(),
        accept_language: hints.accept_language.as_deref(),
        referer: hints.referrer.as_deref(),
    });
    tracing::debug!(%path, ?decision, "locale gate");

    let redirect = match &decision {
        LocaleDecision::Redirect { location, .. } => Some(location.clone()),
        _ => None,
    };
    let nav = navigator();
    use_effect(use_reactive((&redirect,), move |(redirect,)| {
        if let Some(location) = redirect {
            nav.replace(location);
        }
    }));

    match decision {
        LocaleDecision::Redirect { .. } => rsx! {
            section { class: "page page-redirect", aria_busy: "true" }
        },
        LocaleDecision::Gone => rsx! { PageGone {} },
        LocaleDecision::Serve { .. } | LocaleDecision::Bypass => rsx! { NotFound {} },
    }
}

#[component]
pub fn NotFound() -> Element {
    rsx! {
        section { class: "page page-not-found",
            h1 { {t!("not-found-title")} }
            p { {t!("not-found-body")} }
        }
    }
}

/// Removed location pages.
#[component]
pub fn PageGone() -> Element {
    rsx! {
        section { class: "page page-gone",
            h1 { {t!("gone-title")} }
            p { {t!("gone-body")} }
        }
    }
}
