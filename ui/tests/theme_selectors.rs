#![cfg(test)]
/*!
Theme selector lint.

Ensures the selectors the Rust components emit (booking widget states, the
diagnostics page, shared buttons) stay present in `ui/assets/theme/main.css`
and `ui/assets/styling/navbar.css`. A substring check is enough as an early
warning that a rename in the stylesheet left markup unstyled.

If you intentionally rename or remove a selector:
    1. Update the component markup.
    2. Adjust REQUIRED_SELECTORS / NAVBAR_SELECTORS accordingly.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".site-main",
    ".page {",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Booking widget
    ".booking-widget {",
    ".booking-widget__frame",
    ".booking-widget--unconfigured",
    ".booking-widget--failed",
    ".booking-widget__missing",
    ".booking-widget__hints",
    ".booking-widget__cause",
    ".booking-widget__url",
    ".booking-widget__actions",
    // Diagnostics page
    ".widget-test__panel",
    ".widget-test__config",
    ".widget-test__notice",
    ".widget-test__notice--warning",
    // Responsive block
    "@media (max-width: 640px)",
];

const NAVBAR_SELECTORS: &[&str] = &[
    ".navbar {",
    ".navbar__inner",
    ".navbar__brand",
    ".navbar__links",
    ".navbar__link",
    ".navbar__locale",
    ".visually-hidden",
];

fn missing_from(css: &str, selectors: &[&'static str]) -> Vec<&'static str> {
    selectors
        .iter()
        .copied()
        .filter(|sel| !css.contains(sel))
        .collect()
}

#[test]
fn theme_contains_required_selectors() {
    let missing = missing_from(THEME_CSS, REQUIRED_SELECTORS);
    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn navbar_stylesheet_contains_required_selectors() {
    let missing = missing_from(NAVBAR_CSS, NAVBAR_SELECTORS);
    assert!(missing.is_empty(), "navbar.css lacks: {missing:?}");
}

#[test]
fn frame_height_changes_are_animated() {
    // The widget resizes through height messages; the frame animates them.
    let frame_block = THEME_CSS
        .split(".booking-widget__frame {")
        .nth(1)
        .and_then(|rest| rest.split('}').next())
        .expect("frame block present");
    assert!(frame_block.contains("transition: height 0.3s ease-in-out"));
    assert!(frame_block.contains("min-height: 600px"));
}

#[test]
fn theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 1_000,
        "Theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}
