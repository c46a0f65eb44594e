//! DOM component hosting module
//!
//! Serves the HTML host document for a source file rendered inside an
//! embedded web view: matches `/_expo/@dom` requests, validates the `file`
//! query parameter, derives the virtual entry wiring, builds the bundle URL
//! and emits the host document. Transport-agnostic: the handler reads a
//! borrowed [`DomRequest`] and returns a typed [`DomOutcome`] for the router
//! to translate into a response.

pub mod bundle_url;
pub mod entry;
pub mod gate;
pub mod html;
pub mod matcher;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::bundler::{BundleDefaults, EncodeError, ModuleResolver, NodeModulesResolver};
use crate::config::BundlerConfig;
use entry::FILE_SCHEME_PREFIX;
use gate::PreflightGate;

/// Failures the handler does not recover from
///
/// All of these propagate to the server's generic error path; only the
/// malformed `file` parameter is handled locally (as a 400 outcome).
#[derive(Debug, Clone, Error)]
pub enum DomError {
    #[error(
        "To use DOM Components, you must install the 'react-native-webview' package. \
         Run 'npx expo install react-native-webview' to install it."
    )]
    WebViewNotInstalled,

    #[error("unable to resolve 'expo/dom/entry.js' from {project_root}")]
    EntryModuleNotFound { project_root: String },

    #[error(transparent)]
    InvalidBundleOptions(#[from] EncodeError),

    #[error("cannot build an absolute bundle URL against host {host:?}")]
    UnresolvableBundleUrl { host: String },
}

/// The two request fields the handler reads
#[derive(Debug, Clone, Copy)]
pub struct DomRequest<'a> {
    /// Raw request target as received (origin- or absolute-form)
    pub url: &'a str,
    /// `Host` header, when present
    pub host: Option<&'a str>,
}

/// Typed handler result the router maps onto the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomOutcome {
    /// Request is not for this handler; the chain continues untouched
    NotHandled,
    /// Malformed `file` parameter; message carries the offending value
    BadRequest { message: String },
    /// Host document ready to serve
    Document { html: String },
}

/// Request handler for the DOM component host endpoint
pub struct DomComponentsHandler {
    project_root: PathBuf,
    metro_root: PathBuf,
    defaults: BundleDefaults,
    fallback_host: String,
    gate: PreflightGate,
    resolver: Arc<dyn ModuleResolver>,
}

impl DomComponentsHandler {
    /// Build the handler from the bundler configuration.
    ///
    /// `fallback_host` anchors the bundle URL when a request carries no
    /// `Host` header.
    pub fn new(config: &BundlerConfig, fallback_host: String) -> Self {
        Self::with_resolver(config, fallback_host, Arc::new(NodeModulesResolver))
    }

    /// Same, with an injected module resolver
    pub fn with_resolver(
        config: &BundlerConfig,
        fallback_host: String,
        resolver: Arc<dyn ModuleResolver>,
    ) -> Self {
        let defaults = BundleDefaults {
            dev: config.dev,
            minify: config.minify,
            ..BundleDefaults::default()
        };
        Self {
            project_root: config.project_root.clone(),
            metro_root: config.metro_root().to_path_buf(),
            defaults,
            fallback_host,
            gate: PreflightGate::new(),
            resolver,
        }
    }

    /// The preflight gate (exposed for inspection in tests)
    pub fn gate(&self) -> &PreflightGate {
        &self.gate
    }

    /// Process one request.
    ///
    /// Non-matching paths return [`DomOutcome::NotHandled`] with no side
    /// effects. A missing or non-`file://` parameter is rejected before any
    /// resolution happens. Everything after the preflight gate either
    /// produces the host document or propagates a [`DomError`].
    pub fn handle(&self, request: &DomRequest<'_>) -> Result<DomOutcome, DomError> {
        let url = matcher::parse_request_url(request.url);
        if !matcher::is_dom_request(&url) {
            return Ok(DomOutcome::NotHandled);
        }

        let file = url
            .query_pairs()
            .find_map(|(k, v)| (k == "file").then(|| v.into_owned()));
        let file = match file {
            Some(f) if f.starts_with(FILE_SCHEME_PREFIX) => f,
            other => {
                return Ok(DomOutcome::BadRequest {
                    message: format!(
                        "Invalid file path: {}",
                        other.as_deref().unwrap_or("null")
                    ),
                });
            }
        };

        self.gate
            .ensure_webview_installed(self.resolver.as_ref(), &self.project_root)?;
        self.gate.warn_experimental_once();

        let entry = entry::resolve_virtual_entry(
            self.resolver.as_ref(),
            &self.project_root,
            &self.metro_root,
            &file,
        )?;

        let host = request.host.unwrap_or(&self.fallback_host);
        let bundle_url = bundle_url::build_bundle_url(&self.defaults, &entry, host)?;

        let title = entry
            .generated_entry_path
            .rsplit('/')
            .next()
            .unwrap_or(&entry.generated_entry_path);

        Ok(DomOutcome::Document {
            html: html::dom_component_html(Some(&bundle_url), Some(title)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// In-memory stand-in for a project with the web-view peer installed
    struct FakeProject {
        webview_installed: bool,
    }

    impl ModuleResolver for FakeProject {
        fn resolve(&self, root: &Path, specifier: &str) -> Option<PathBuf> {
            match specifier {
                entry::DOM_ENTRY_SPECIFIER => {
                    Some(root.join("node_modules/expo/dom/entry.js"))
                }
                gate::WEBVIEW_PACKAGE if self.webview_installed => {
                    Some(root.join("node_modules").join(specifier))
                }
                _ => None,
            }
        }
    }

    fn make_handler(webview_installed: bool) -> DomComponentsHandler {
        let config = BundlerConfig {
            project_root: PathBuf::from("/proj"),
            metro_root: None,
            dev: true,
            minify: false,
        };
        DomComponentsHandler::with_resolver(
            &config,
            "127.0.0.1:8081".to_string(),
            Arc::new(FakeProject { webview_installed }),
        )
    }

    #[test]
    fn test_non_matching_path_is_not_handled() {
        let handler = make_handler(true);
        let outcome = handler
            .handle(&DomRequest {
                url: "/index.html",
                host: Some("localhost:8081"),
            })
            .unwrap();
        assert_eq!(outcome, DomOutcome::NotHandled);
        // No gate activity for untouched requests
        assert!(!handler.gate().checked(Path::new("/proj")));
        assert!(!handler.gate().has_warned());
    }

    #[test]
    fn test_missing_file_param_is_rejected_with_null() {
        let handler = make_handler(true);
        let outcome = handler
            .handle(&DomRequest {
                url: "/_expo/@dom",
                host: Some("localhost:8081"),
            })
            .unwrap();
        assert_eq!(
            outcome,
            DomOutcome::BadRequest {
                message: "Invalid file path: null".to_string()
            }
        );
        assert!(!handler.gate().checked(Path::new("/proj")));
    }

    #[test]
    fn test_non_file_scheme_is_rejected_with_value() {
        let handler = make_handler(true);
        let outcome = handler
            .handle(&DomRequest {
                url: "/_expo/@dom?file=http://evil/x.js",
                host: Some("localhost:8081"),
            })
            .unwrap();
        assert_eq!(
            outcome,
            DomOutcome::BadRequest {
                message: "Invalid file path: http://evil/x.js".to_string()
            }
        );
    }

    #[test]
    fn test_host_document_end_to_end() {
        let handler = make_handler(true);
        let outcome = handler
            .handle(&DomRequest {
                url: "/_expo/@dom?file=file%3A%2F%2F%2Fproj%2Fsrc%2FWidget.js",
                host: Some("localhost:8081"),
            })
            .unwrap();

        let DomOutcome::Document { html } = outcome else {
            panic!("expected a host document");
        };
        assert!(html.contains("<title>Widget.js</title>"));
        assert!(html.contains("<script crossorigin src=\"//localhost:8081/"));
        assert!(html.contains("platform=web"));
        assert!(html.contains("engine=hermes"));
        assert!(html.contains("lazy=true"));
        assert!(html.contains("bytecode=false"));
        assert!(html.contains("entry.bundle"));
    }

    #[test]
    fn test_extra_path_segments_still_match() {
        let handler = make_handler(true);
        let outcome = handler
            .handle(&DomRequest {
                url: "/_expo/@dom/foo.js?file=file:///proj/src/Widget.js",
                host: Some("localhost:8081"),
            })
            .unwrap();
        assert!(matches!(outcome, DomOutcome::Document { .. }));
    }

    #[test]
    fn test_missing_host_falls_back_to_server_address() {
        let handler = make_handler(true);
        let outcome = handler
            .handle(&DomRequest {
                url: "/_expo/@dom?file=file:///proj/src/Widget.js",
                host: None,
            })
            .unwrap();
        let DomOutcome::Document { html } = outcome else {
            panic!("expected a host document");
        };
        assert!(html.contains("src=\"//127.0.0.1:8081/"));
    }

    #[test]
    fn test_missing_webview_dependency_propagates() {
        let handler = make_handler(false);
        let err = handler
            .handle(&DomRequest {
                url: "/_expo/@dom?file=file:///proj/src/Widget.js",
                host: Some("localhost:8081"),
            })
            .unwrap_err();
        assert!(err.to_string().contains("react-native-webview"));
    }

    #[test]
    fn test_dependency_probe_memoized_across_requests() {
        let handler = make_handler(true);
        let request = DomRequest {
            url: "/_expo/@dom?file=file:///proj/src/Widget.js",
            host: Some("localhost:8081"),
        };
        handler.handle(&request).unwrap();
        assert!(handler.gate().checked(Path::new("/proj")));
        handler.handle(&request).unwrap();
        assert!(handler.gate().has_warned());
    }
}
