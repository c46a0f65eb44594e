//! Filesystem module resolution
//!
//! Minimal node-style resolution: walk from a root directory up through its
//! ancestors, probing `node_modules/<specifier>`. The specifier may be a
//! bare package name (`react-native-webview`) or a package-relative file
//! path (`expo/dom/entry.js`).

use std::path::{Path, PathBuf};

/// Resolution seam for dependency probing and entry lookup
///
/// Injected into the DOM component handler so tests can substitute an
/// in-memory resolver for the filesystem walk.
pub trait ModuleResolver: Send + Sync {
    /// Resolve `specifier` starting the search at `root`.
    ///
    /// Returns the absolute path on success, `None` when nothing matched.
    fn resolve(&self, root: &Path, specifier: &str) -> Option<PathBuf>;
}

/// Default resolver walking real `node_modules` directories
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeModulesResolver;

impl ModuleResolver for NodeModulesResolver {
    fn resolve(&self, root: &Path, specifier: &str) -> Option<PathBuf> {
        let mut dir = Some(root);
        while let Some(current) = dir {
            let candidate = current.join("node_modules").join(specifier);
            if candidate.exists() {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dom-dev-server-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolves_package_from_root() {
        let root = scratch_dir("resolve-root");
        fs::create_dir_all(root.join("node_modules/react-native-webview")).unwrap();

        let resolver = NodeModulesResolver;
        let found = resolver.resolve(&root, "react-native-webview").unwrap();
        assert_eq!(found, root.join("node_modules/react-native-webview"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_walks_up_to_ancestor_node_modules() {
        let root = scratch_dir("resolve-walk");
        fs::create_dir_all(root.join("node_modules/expo/dom")).unwrap();
        fs::write(root.join("node_modules/expo/dom/entry.js"), "export {};").unwrap();
        let nested = root.join("packages/app");
        fs::create_dir_all(&nested).unwrap();

        let resolver = NodeModulesResolver;
        let found = resolver.resolve(&nested, "expo/dom/entry.js").unwrap();
        assert_eq!(found, root.join("node_modules/expo/dom/entry.js"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_package_resolves_to_none() {
        let root = scratch_dir("resolve-missing");
        let resolver = NodeModulesResolver;
        assert!(resolver.resolve(&root, "react-native-webview").is_none());
        fs::remove_dir_all(&root).unwrap();
    }
}
