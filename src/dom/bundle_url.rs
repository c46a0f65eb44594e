//! Bundle URL construction module
//!
//! Merges the caller's bundling defaults with the DOM-component overrides,
//! asks the encoder for the servable path, and resolves it into an absolute
//! URL against the request's host.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::bundler::{bundle_url_path, BundleDefaults, BundleOptions};
use crate::dom::entry::VirtualEntry;
use crate::dom::DomError;

/// Characters escaped by `encodeURI`: everything except alphanumerics and
/// the URI structure/mark characters it leaves intact.
const ENCODE_URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// URI-encode a relative import specifier
pub fn encode_uri(value: &str) -> String {
    utf8_percent_encode(value, ENCODE_URI_SET).to_string()
}

/// Build the absolute bundle URL for a resolved virtual entry.
///
/// Encoder failures propagate unhandled; the host falls back onto the
/// server's own address upstream, so an unparseable base here means the
/// Host header itself was unusable.
pub fn build_bundle_url(
    defaults: &BundleDefaults,
    entry: &VirtualEntry,
    host: &str,
) -> Result<String, DomError> {
    let options = BundleOptions::for_dom_component(
        defaults,
        entry.main_module_name.clone(),
        encode_uri(&entry.relative_import),
    );
    let path = bundle_url_path(&options)?;

    let base = Url::parse(&format!("http://{host}")).map_err(|_| DomError::UnresolvableBundleUrl {
        host: host.to_string(),
    })?;
    let url = base.join(&path).map_err(|_| DomError::UnresolvableBundleUrl {
        host: host.to_string(),
    })?;

    Ok(url.to_string())
}
