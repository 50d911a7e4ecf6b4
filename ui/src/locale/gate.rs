//! Request-level language routing: which language serves a path, and when
//! a path must be redirected or reported as gone.

use url::Url;

use super::language::{Language, FALLBACK, SUPPORTED};
use super::negotiate::best_match;

/// Old URLs that moved permanently. Only the booking target is a page of
/// this site; the others resolve to "not found" under `/nl`.
const LEGACY_REDIRECTS: &[(&str, &str)] = &[
    ("/appointment", "/nl/booking"),
    ("/services", "/nl/services"),
    ("/wie-is-wie", "/nl/about"),
];

/// Location pages that were removed for good.
const REMOVED_PAGES: &[&str] = &["/gent", "/merelbeke", "/oudenaarde"];

/// Prefixes never touched by language routing.
const UNROUTED_PREFIXES: &[&str] = &[
    "/api",
    "/_next/static",
    "/_next/image",
    "/assets",
    "/favicon.ico",
    "/sw.js",
    "/site.webmanifest",
];

const STATIC_EXTENSIONS: &[&str] = &["ico", "png", "jpg", "jpeg", "svg", "webp", "xml", "txt"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleRequest<'a> {
    pub path: &'a str,
    /// Raw query including the leading `?`, or empty.
    pub query: &'a str,
    /// Raw fragment including the leading `#`, or empty.
    pub fragment: &'a str,
    pub cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
    pub referer: Option<&'a str>,
}

impl<'a> LocaleRequest<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    /// Not a page; leave it alone.
    Bypass,
    /// Permanently removed (HTTP 410).
    Gone,
    Redirect { location: String, permanent: bool },
    Serve {
        language: Language,
        /// Language to store in the cookie, taken from the referring page.
        remember: Option<Language>,
    },
}

/// Language whose prefix the path carries (`/fr` or `/fr/...`).
pub fn language_in_path(path: &str) -> Option<Language> {
    let first = path.strip_prefix('/')?.split('/').next()?;
    Language::from_code(first)
}

pub fn route(request: &LocaleRequest<'_>) -> LocaleDecision {
    let path = request.path;

    if let Some((_, target)) = LEGACY_REDIRECTS.iter().find(|(from, _)| *from == path) {
        return LocaleDecision::Redirect {
            location: (*target).to_string(),
            permanent: true,
        };
    }

    if path.contains("icon")
        || path.contains("chrome")
        || UNROUTED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
    {
        return LocaleDecision::Bypass;
    }

    if is_removed_page(path) {
        return LocaleDecision::Gone;
    }

    let negotiated = request
        .cookie
        .and_then(best_match)
        .or_else(|| request.accept_language.and_then(best_match))
        .unwrap_or(FALLBACK);
    let in_path = language_in_path(path);

    if path == "/" || path.is_empty() {
        return LocaleDecision::Redirect {
            location: format!("/{}{}", negotiated.code(), request.query),
            permanent: false,
        };
    }

    if in_path.is_none() && !is_static(path) {
        return LocaleDecision::Redirect {
            location: format!(
                "/{}{}{}{}",
                negotiated.code(),
                path,
                request.query,
                request.fragment
            ),
            permanent: false,
        };
    }

    LocaleDecision::Serve {
        language: in_path.unwrap_or(negotiated),
        remember: request.referer.and_then(referer_language),
    }
}

/// Rewrite the language prefix of `path` for the language switcher.
pub fn switch_language_path(path: &str, from: Language, to: Language) -> String {
    match language_in_path(path) {
        Some(current) if current == from => {
            let rest = &path[1 + from.code().len()..];
            format!("/{}{rest}", to.code())
        }
        _ => format!("/{}{}", to.code(), if path == "/" { "" } else { path }),
    }
}

fn is_removed_page(path: &str) -> bool {
    let under = |candidate: &str, page: &str| {
        candidate == page
            || candidate
                .strip_prefix(page)
                .is_some_and(|rest| rest.starts_with('/'))
    };
    REMOVED_PAGES.iter().any(|page| {
        under(path, page)
            || SUPPORTED.iter().any(|lang| {
                path.strip_prefix('/')
                    .and_then(|p| p.strip_prefix(lang.code()))
                    .is_some_and(|rest| under(rest, page))
            })
    })
}

fn is_static(path: &str) -> bool {
    if path.starts_with("/_next") || path.starts_with("/api") || path.starts_with("/favicon") {
        return true;
    }
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| STATIC_EXTENSIONS.contains(&ext))
}

fn referer_language(referer: &str) -> Option<Language> {
    let url = Url::parse(referer).ok()?;
    language_in_path(url.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_to_negotiated_language() {
        let request = LocaleRequest {
            path: "/",
            query: "?utm=mail",
            accept_language: Some("fr-BE,fr;q=0.9"),
            ..LocaleRequest::default()
        };
        assert_eq!(
            route(&request),
            LocaleDecision::Redirect {
                location: "/fr?utm=mail".into(),
                permanent: false
            }
        );
    }

    #[test]
    fn cookie_wins_over_header() {
        let request = LocaleRequest {
            path: "/",
            cookie: Some("pt"),
            accept_language: Some("en"),
            ..LocaleRequest::default()
        };
        assert!(matches!(
            route(&request),
            LocaleDecision::Redirect { location, .. } if location == "/pt"
        ));
    }

    #[test]
    fn unprefixed_page_keeps_query_and_fragment() {
        let request = LocaleRequest {
            path: "/booking",
            query: "?a=1",
            fragment: "#slots",
            ..LocaleRequest::default()
        };
        assert_eq!(
            route(&request),
            LocaleDecision::Redirect {
                location: "/nl/booking?a=1#slots".into(),
                permanent: false
            }
        );
    }

    #[test]
    fn legacy_paths_redirect_permanently() {
        assert_eq!(
            route(&LocaleRequest::new("/appointment")),
            LocaleDecision::Redirect {
                location: "/nl/booking".into(),
                permanent: true
            }
        );
    }

    #[test]
    fn legacy_targets_are_final() {
        for (from, to) in LEGACY_REDIRECTS {
            assert_eq!(
                route(&LocaleRequest::new(from)),
                LocaleDecision::Redirect {
                    location: to.to_string(),
                    permanent: true
                }
            );
            assert!(
                matches!(
                    route(&LocaleRequest::new(to)),
                    LocaleDecision::Serve {
                        language: Language::Nl,
                        ..
                    }
                ),
                "{to} must not redirect again"
            );
        }
    }

    #[test]
    fn removed_pages_are_gone_with_or_without_prefix() {
        for path in ["/gent", "/merelbeke/", "/en/oudenaarde", "/fr/gent/contact"] {
            assert_eq!(route(&LocaleRequest::new(path)), LocaleDecision::Gone, "{path}");
        }
        assert_ne!(route(&LocaleRequest::new("/gentle")), LocaleDecision::Gone);
    }

    #[test]
    fn assets_and_icons_bypass_routing() {
        for path in ["/assets/logo.png", "/apple-touch-icon.png", "/api/health", "/sw.js"] {
            assert_eq!(route(&LocaleRequest::new(path)), LocaleDecision::Bypass, "{path}");
        }
    }

    #[test]
    fn static_files_are_served_without_redirect() {
        assert_eq!(
            route(&LocaleRequest::new("/robots.txt")),
            LocaleDecision::Serve {
                language: Language::Nl,
                remember: None
            }
        );
    }

    #[test]
    fn prefixed_page_serves_and_remembers_referer_language() {
        let request = LocaleRequest {
            path: "/en/booking",
            referer: Some("https://danahair.be/fr/about"),
            ..LocaleRequest::default()
        };
        assert_eq!(
            route(&request),
            LocaleDecision::Serve {
                language: Language::En,
                remember: Some(Language::Fr)
            }
        );
    }

    #[test]
    fn prefix_match_respects_segment_boundary() {
        assert_eq!(language_in_path("/nl/booking"), Some(Language::Nl));
        assert_eq!(language_in_path("/nl"), Some(Language::Nl));
        assert_eq!(language_in_path("/nlx"), None);
    }

    #[test]
    fn switcher_rewrites_prefix() {
        assert_eq!(
            switch_language_path("/nl/booking", Language::Nl, Language::Fr),
            "/fr/booking"
        );
        assert_eq!(switch_language_path("/en", Language::En, Language::Pt), "/pt");
        assert_eq!(switch_language_path("/", Language::Nl, Language::En), "/en");
    }
}
