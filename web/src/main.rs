use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::platform;
use ui::locale::{language_in_path, route, Language, LocaleDecision, LocaleRequest};
use ui::views::{Booking, Home, LocaleGate, WidgetTest};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[nest("/:lng")]
        #[layout(SiteLayout)]
            #[route("/")]
            Home { lng: String },
            #[route("/booking")]
            Booking { lng: String },
            #[route("/widget-test")]
            WidgetTest { lng: String },
        #[end_layout]
    #[end_nest]
    #[route("/:..segments")]
    Unrouted { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");

fn nav_home(language: Language, label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home { lng: language.code().to_string() },
        "{label}"
    })
}
fn nav_booking(language: Language, label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Booking { lng: language.code().to_string() },
        "{label}"
    })
}

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder {
            home: nav_home,
            booking: nav_booking,
        });
    }

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        Router::<Route> {}
    }
}

#[component]
fn Root() -> Element {
    rsx! { LocaleGate { path: "/".to_string() } }
}

#[component]
fn Unrouted(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! { LocaleGate { path } }
}

/// Language-prefixed pages. An unknown prefix goes back through the gate,
/// which redirects, reports the page as gone or shows "not found".
#[component]
fn SiteLayout(lng: String) -> Element {
    let path = use_route::<Route>().to_string();
    let hints = use_hook(platform::locale_hints);
    let served = route(&LocaleRequest {
        referer: hints.referrer.as_deref(),
        ..LocaleRequest::new(&path)
    });
    use_effect(use_reactive((&served,), |(served,)| {
        if let LocaleDecision::Serve {
            remember: Some(previous),
            ..
        } = served
        {
            platform::remember_language(previous);
        }
    }));

    let Some(language) = language_in_path(&path) else {
        return rsx! { LocaleGate { path } };
    };
    ui::i18n::select_language(language);

    rsx! {
        AppNavbar { language, path }
        main { class: "site-main", lang: "{lng}",
            Outlet::<Route> {}
        }
    }
}
