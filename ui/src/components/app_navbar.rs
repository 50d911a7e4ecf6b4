use crate::core::platform;
use crate::i18n;
use crate::locale::{switch_language_path, Language, SUPPORTED};
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

// Navbar stylesheet
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` does not need to know each platform's `Route` enum.
///
/// Each closure receives the page language (to build the prefixed route)
/// and the localized label, and returns a `Link` containing that label.
///
/// Example (in platform crate):
/// ```ignore
/// use ui::components::app_navbar::{register_nav, NavBuilder};
/// fn install_nav() {
///     register_nav(NavBuilder {
///         home: |lng, label| rsx!( Link { class: "navbar__link", to: Route::Home { lng: lng.code().into() }, "{label}" } ),
///         booking: |lng, label| rsx!( Link { class: "navbar__link", to: Route::Booking { lng: lng.code().into() }, "{label}" } ),
///     });
/// }
/// ```
///
/// Without a registered builder the navbar renders whatever `children` it
/// was given.
pub struct NavBuilder {
    pub home: fn(language: Language, label: &str) -> Element,
    pub booking: fn(language: Language, label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    if NAV_BUILDER.set(builder).is_err() {
        tracing::debug!("navigation builder already registered");
    }
}

/// Site header. `path` is the current route path; the language switcher
/// rewrites its prefix.
#[component]
pub fn AppNavbar(language: Language, path: String, children: Element) -> Element {
    i18n::select_language(language);

    let internal_nav = NAV_BUILDER.get().map(|b| {
        let home = (b.home)(language, &t!("nav-home"));
        let booking = (b.booking)(language, &t!("nav-booking"));
        rsx! {
            nav { class: "navbar__links",
                {home}
                {booking}
            }
        }
    });

    let switch_path = path.clone();
    let on_change = move |evt: dioxus::events::FormEvent| {
        let target = match evt.value().parse::<Language>() {
            Ok(target) => target,
            Err(err) => {
                tracing::warn!(%err, "language switcher sent an unknown value");
                return;
            }
        };
        if target == language {
            return;
        }
        platform::remember_language(target);
        let location = switch_language_path(&switch_path, language, target);
        tracing::debug!(from = language.code(), to = target.code(), %location, "switching language");
        navigator().push(location);
    };

    let tagline = t!("tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-mark", "D'Ana Hair" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                div { class: "navbar__locale",
                    label { class: "visually-hidden", r#for: "locale-select",
                        {t!("nav-language-label")}
                    }
                    select {
                        id: "locale-select",
                        value: "{language.code()}",
                        oninput: on_change,
                        for lang in SUPPORTED {
                            option {
                                key: "{lang.code()}",
                                value: "{lang.code()}",
                                selected: lang == language,
                                "{lang.flag()} {lang.native_name()}"
                            }
                        }
                    }
                }
            }
        }
    }
}
