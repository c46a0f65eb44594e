//! Request matching module
//!
//! Decides whether an incoming request targets the DOM component host
//! endpoint, tolerating the relative request targets internal transports
//! produce.

use url::Url;

/// URL prefix intercepted by the DOM component handler
///
/// Requests may carry additional path segments after the prefix
/// (`/_expo/@dom/foo.js?file=...`) to help browser dev tools; those
/// segments carry no meaning here.
pub const DOM_COMPONENTS_PATH_PREFIX: &str = "/_expo/@dom";

/// Synthetic base for re-parsing relative request targets
const FALLBACK_BASE: &str = "http://localhost:0";

/// Parse a raw request target into a URL, never failing
///
/// Strict parse first; a relative or otherwise unparseable target is
/// re-parsed against the synthetic base so pathname and query extraction
/// always succeed.
pub fn parse_request_url(raw: &str) -> Url {
    match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => {
            let base = Url::parse(FALLBACK_BASE).expect("fallback base is a valid absolute URL");
            base.join(raw).unwrap_or(base)
        }
    }
}

/// Check whether a parsed request URL belongs to the DOM component handler
pub fn is_dom_request(url: &Url) -> bool {
    url.path().starts_with(DOM_COMPONENTS_PATH_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative_target() {
        let url = parse_request_url("/_expo/@dom?file=file:///proj/App.js");
        assert_eq!(url.path(), "/_expo/@dom");
        assert!(url.query().is_some());
    }

    #[test]
    fn test_parse_absolute_target() {
        let url = parse_request_url("http://localhost:8081/_expo/@dom");
        assert_eq!(url.path(), "/_expo/@dom");
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_parse_never_panics_on_garbage() {
        let url = parse_request_url("http://[");
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_prefix_match() {
        assert!(is_dom_request(&parse_request_url("/_expo/@dom")));
        assert!(is_dom_request(&parse_request_url("/_expo/@dom/foo.js?file=x")));
        assert!(!is_dom_request(&parse_request_url("/_expo/other")));
        assert!(!is_dom_request(&parse_request_url("/index.html")));
    }
}
