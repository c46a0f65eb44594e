//! Preflight gate module
//!
//! Process-wide checks that run real work at most once: the web-view peer
//! dependency probe (cached per project root, success or failure alike) and
//! the one-time experimental-feature advisory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::bundler::ModuleResolver;
use crate::dom::DomError;
use crate::logger;

/// Primary peer package rendering DOM components on native platforms
pub const WEBVIEW_PACKAGE: &str = "react-native-webview";
/// Alternate web-view implementation accepted in its place
pub const DOM_WEBVIEW_PACKAGE: &str = "@expo/dom-webview";

const EXPERIMENTAL_WARNING: &str =
    "Using experimental DOM Components API. Production exports may not work as expected.";

/// One-time check state, owned by the server startup context
///
/// The dependency map is locked across the probe: the multi-threaded
/// runtime would otherwise race two first requests into duplicate probes.
#[derive(Debug, Default)]
pub struct PreflightGate {
    dep_checks: Mutex<HashMap<PathBuf, Result<(), DomError>>>,
    warned_experimental: AtomicBool,
}

impl PreflightGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a web-view implementation is installed under `project_root`.
    ///
    /// The filesystem probe runs at most once per root per process; the
    /// outcome is cached either way, so a missing dependency keeps failing
    /// identically (and cheaply) on every subsequent request.
    pub fn ensure_webview_installed(
        &self,
        resolver: &dyn ModuleResolver,
        project_root: &Path,
    ) -> Result<(), DomError> {
        let mut checks = self
            .dep_checks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(cached) = checks.get(project_root) {
            return cached.clone();
        }

        let result = if resolver.resolve(project_root, WEBVIEW_PACKAGE).is_some()
            || resolver.resolve(project_root, DOM_WEBVIEW_PACKAGE).is_some()
        {
            Ok(())
        } else {
            Err(DomError::WebViewNotInstalled)
        };

        checks.insert(project_root.to_path_buf(), result.clone());
        result
    }

    /// Emit the experimental-feature advisory, first call only.
    ///
    /// Global: suppressed on every later invocation regardless of root.
    pub fn warn_experimental_once(&self) {
        if !self.warned_experimental.swap(true, Ordering::Relaxed) {
            logger::log_warning(EXPERIMENTAL_WARNING);
        }
    }

    /// Whether the advisory has been emitted
    pub fn has_warned(&self) -> bool {
        self.warned_experimental.load(Ordering::Relaxed)
    }

    /// Whether a dependency probe has run for `project_root`
    pub fn checked(&self, project_root: &Path) -> bool {
        self.dep_checks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Resolver that counts probes and resolves a fixed set of specifiers
    struct CountingResolver {
        installed: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl CountingResolver {
        fn new(installed: Vec<&'static str>) -> Self {
            Self {
                installed,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ModuleResolver for CountingResolver {
        fn resolve(&self, root: &Path, specifier: &str) -> Option<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.installed
                .iter()
                .any(|s| *s == specifier)
                .then(|| root.join("node_modules").join(specifier))
        }
    }

    #[test]
    fn test_probe_runs_at_most_once_per_root() {
        let gate = PreflightGate::new();
        let resolver = CountingResolver::new(vec![WEBVIEW_PACKAGE]);
        let root = Path::new("/proj");

        for _ in 0..5 {
            gate.ensure_webview_installed(&resolver, root).unwrap();
        }
        // One probe resolved the primary package; the four repeat requests hit the cache
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert!(gate.checked(root));
    }

    #[test]
    fn test_alternate_package_satisfies_check() {
        let gate = PreflightGate::new();
        let resolver = CountingResolver::new(vec![DOM_WEBVIEW_PACKAGE]);
        assert!(gate
            .ensure_webview_installed(&resolver, Path::new("/proj"))
            .is_ok());
    }

    #[test]
    fn test_failure_is_cached_and_repeats_identically() {
        let gate = PreflightGate::new();
        let resolver = CountingResolver::new(vec![]);
        let root = Path::new("/proj");

        let first = gate.ensure_webview_installed(&resolver, root);
        let second = gate.ensure_webview_installed(&resolver, root);
        assert!(matches!(&first, Err(DomError::WebViewNotInstalled)));
        assert_eq!(first.unwrap_err().to_string(), second.unwrap_err().to_string());
        // Two specifiers probed once; the second request never touched the resolver
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_distinct_roots_probe_separately() {
        let gate = PreflightGate::new();
        let resolver = CountingResolver::new(vec![WEBVIEW_PACKAGE]);

        gate.ensure_webview_installed(&resolver, Path::new("/a")).unwrap();
        gate.ensure_webview_installed(&resolver, Path::new("/b")).unwrap();
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_missing_dependency_error_names_package_and_remedy() {
        let gate = PreflightGate::new();
        let resolver = CountingResolver::new(vec![]);
        let err = gate
            .ensure_webview_installed(&resolver, Path::new("/proj"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("react-native-webview"));
        assert!(message.contains("npx expo install react-native-webview"));
    }

    #[test]
    fn test_warning_emitted_once() {
        let gate = PreflightGate::new();
        assert!(!gate.has_warned());
        gate.warn_experimental_once();
        assert!(gate.has_warned());
        // Second call is a no-op
        gate.warn_experimental_once();
        assert!(gate.has_warned());
    }
}
