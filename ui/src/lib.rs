//! Shared UI crate for the D'Ana Hair site. The booking widget embed, the
//! language routing and every view live here; platform crates only supply
//! their `Route` enum and launch.

use dioxus::prelude::*;

pub mod core;
pub mod embed;
pub mod i18n;
pub mod locale;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Site-wide stylesheet (layout, buttons, booking widget states).
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
