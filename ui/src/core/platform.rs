//! Browser glue (cookies, navigator languages, window messages).
//!
//! Every function has a native fallback so the crate builds and tests off
//! wasm; the fallbacks do nothing or report "unknown".

use crate::locale::Language;

/// Language preferences visible to the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleHints {
    pub cookie: Option<String>,
    pub accept_language: Option<String>,
    pub referrer: Option<String>,
    /// `location.search`, with its leading `?`, or empty.
    pub query: String,
    /// `location.hash`, with its leading `#`, or empty.
    pub fragment: String,
}

#[cfg(target_arch = "wasm32")]
pub fn locale_hints() -> LocaleHints {
    use crate::locale::{cookie_value, LOCALE_COOKIE};
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return LocaleHints::default();
    };

    let languages = window
        .navigator()
        .languages()
        .iter()
        .filter_map(|lang| lang.as_string())
        .collect::<Vec<_>>();
    let accept_language = (!languages.is_empty()).then(|| languages.join(","));

    let location = window.location();
    let query = location.search().unwrap_or_default();
    let fragment = location.hash().unwrap_or_default();

    let document = window.document();
    let cookie = document
        .as_ref()
        .and_then(|doc| doc.clone().dyn_into::<web_sys::HtmlDocument>().ok())
        .and_then(|doc| doc.cookie().ok())
        .and_then(|raw| cookie_value(&raw, LOCALE_COOKIE).map(str::to_owned));
    let referrer = document
        .map(|doc| doc.referrer())
        .filter(|r| !r.is_empty());

    LocaleHints {
        cookie,
        accept_language,
        referrer,
        query,
        fragment,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn locale_hints() -> LocaleHints {
    LocaleHints::default()
}

/// Persist the language choice for the next visit to `/`.
#[cfg(target_arch = "wasm32")]
pub fn remember_language(language: Language) {
    use crate::locale::LOCALE_COOKIE;
    use wasm_bindgen::JsCast;

    let Some(doc) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
    else {
        return;
    };
    let cookie = format!("{LOCALE_COOKIE}={}; path=/; SameSite=Lax", language.code());
    if doc.set_cookie(&cookie).is_err() {
        tracing::warn!("could not store language cookie");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remember_language(language: Language) {
    tracing::debug!(language = language.code(), "language cookie skipped on native target");
}

/// Keeps a window `message` listener registered until dropped.
#[cfg(target_arch = "wasm32")]
pub struct MessageListener {
    closure: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MessageEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for MessageListener {
    fn drop(&mut self) {
        use wasm_bindgen::JsCast;

        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "message",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Call `on_message(origin, json)` for every window message. String payloads
/// are passed through as-is, objects are JSON-stringified.
#[cfg(target_arch = "wasm32")]
pub fn listen_for_messages<F>(mut on_message: F) -> Option<MessageListener>
where
    F: FnMut(String, String) + 'static,
{
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let window = web_sys::window()?;
    let closure = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(
        move |event: web_sys::MessageEvent| {
            let data = event.data();
            let raw = match data.as_string() {
                Some(text) => text,
                None => match js_sys::JSON::stringify(&data) {
                    Ok(text) => String::from(text),
                    Err(_) => return,
                },
            };
            on_message(event.origin(), raw);
        },
    );
    window
        .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        .ok()?;
    Some(MessageListener { closure })
}

#[cfg(not(target_arch = "wasm32"))]
pub struct MessageListener;

#[cfg(not(target_arch = "wasm32"))]
pub fn listen_for_messages<F>(_on_message: F) -> Option<MessageListener>
where
    F: FnMut(String, String) + 'static,
{
    None
}
