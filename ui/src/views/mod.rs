mod booking;
mod gate;
mod home;
mod widget_test;

pub use booking::Booking;
pub use gate::{LocaleGate, NotFound, PageGone};
pub use home::Home;
pub use widget_test::WidgetTest;

use crate::locale::{Language, FALLBACK};

/// Language from a `:lng` route segment. The layout has already rejected
/// unknown prefixes, so the fallback only covers direct use of a view.
fn page_language(lng: &str) -> Language {
    Language::from_code(lng).unwrap_or(FALLBACK)
}
