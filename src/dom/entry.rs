//! Virtual entry resolution module
//!
//! Derives the relative import specifier connecting the generated wrapper
//! entry module (`expo/dom/entry.js`) to the requested source file, plus the
//! bundler-relative name of the wrapper itself. All derived paths are POSIX:
//! the relative import travels inside a URI.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

use crate::bundler::ModuleResolver;
use crate::dom::DomError;

/// Wrapper module resolved from the project root
pub const DOM_ENTRY_SPECIFIER: &str = "expo/dom/entry.js";

/// Scheme prefix required on the `file` query parameter
pub const FILE_SCHEME_PREFIX: &str = "file://";

/// Resolved entry wiring for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
    /// Absolute POSIX path of the wrapper module
    pub virtual_entry_path: String,
    /// Absolute POSIX path of the requested source file
    pub generated_entry_path: String,
    /// `./`-prefixed POSIX specifier from the wrapper's directory to the file
    pub relative_import: String,
    /// Wrapper path relative to the bundler root
    pub main_module_name: String,
}

/// Derive the virtual entry wiring for a validated `file://` URI.
///
/// Wrapper resolution failure is fatal and propagates; there is no guard
/// against the requested file being the wrapper itself — the degenerate
/// specifier is accepted.
pub fn resolve_virtual_entry(
    resolver: &dyn ModuleResolver,
    project_root: &Path,
    metro_root: &Path,
    file_uri: &str,
) -> Result<VirtualEntry, DomError> {
    let generated_entry_path = to_posix_path(&file_uri_to_path(file_uri));

    let virtual_entry = resolver
        .resolve(project_root, DOM_ENTRY_SPECIFIER)
        .ok_or_else(|| DomError::EntryModuleNotFound {
            project_root: project_root.display().to_string(),
        })?;
    let virtual_entry_path = to_posix_path(&virtual_entry);

    // The relative import is used like a URI so it must stay POSIX, and the
    // `./` prefix keeps downstream import machinery from reading it as a
    // bare or absolute specifier.
    let relative_import = format!(
        "./{}",
        posix_relative(posix_dirname(&virtual_entry_path), &generated_entry_path)
    );
    let main_module_name = posix_relative(&to_posix_path(metro_root), &virtual_entry_path);

    Ok(VirtualEntry {
        virtual_entry_path,
        generated_entry_path,
        relative_import,
        main_module_name,
    })
}

/// Convert a `file://` URI into a native filesystem path
///
/// Falls back to stripping the scheme prefix and percent-decoding when the
/// URI does not parse as a file URL (the permissive behavior internal
/// transports rely on).
pub fn file_uri_to_path(file_uri: &str) -> PathBuf {
    if let Ok(url) = Url::parse(file_uri) {
        if let Ok(path) = url.to_file_path() {
            return path;
        }
    }
    let trimmed = file_uri.strip_prefix(FILE_SCHEME_PREFIX).unwrap_or(file_uri);
    PathBuf::from(percent_decode_str(trimmed).decode_utf8_lossy().into_owned())
}

/// Normalize a path to POSIX separators
pub fn to_posix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Directory portion of a POSIX path (no trailing slash)
pub fn posix_dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Relative POSIX path from directory `from` to `to`
pub fn posix_relative(from: &str, to: &str) -> String {
    let from_parts: Vec<&str> = from.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
    let to_parts: Vec<&str> = to.split('/').filter(|p| !p.is_empty() && *p != ".").collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_parts.len() {
        parts.push("..");
    }
    parts.extend(&to_parts[common..]);
    parts.join("/")
}
