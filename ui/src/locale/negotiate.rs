//! Accept-Language / cookie negotiation.

use super::language::Language;

/// `(range, quality)` pairs ordered by descending quality; ties keep header
/// order. Malformed qualities count as 1.0, zero-quality ranges are dropped.
pub fn parse_accept_language(header: &str) -> Vec<(String, f32)> {
    let mut ranges: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let range = pieces.next()?.trim();
            if range.is_empty() {
                return None;
            }
            let quality = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .filter(|q| q.is_finite())
                .unwrap_or(1.0);
            (quality > 0.0).then(|| (range.to_string(), quality))
        })
        .collect();
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranges
}

/// Highest-ranked supported language in an Accept-Language style value.
/// A bare cookie value such as `fr` is a one-entry header.
pub fn best_match(header: &str) -> Option<Language> {
    parse_accept_language(header)
        .into_iter()
        .find_map(|(range, _)| Language::from_tag(&range))
}

/// Value of cookie `name` in a `Cookie` header / `document.cookie` string.
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}
