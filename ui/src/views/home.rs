use dioxus::prelude::*;

use super::page_language;

#[component]
pub fn Home(lng: String) -> Element {
    let language = page_language(&lng);

    rsx! {
        section { class: "page page-home",
            h1 { {crate::t!("home-title")} }
            p { {crate::t!("home-intro")} }
            p { class: "page-home__cta",
                Link {
                    class: "button button--primary",
                    to: format!("/{}/booking", language.code()),
                    {crate::t!("home-cta")}
                }
            }
        }
    }
}
