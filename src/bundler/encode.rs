//! Bundle URL path encoder
//!
//! Turns a fully-determined option set into the server-relative path the
//! bundler serves it under: the main module name with its `.js` suffix
//! replaced by `.bundle`, followed by the options as a query string.

use thiserror::Error;

use super::options::{BundleOptions, JsEngine};

/// Invalid option combinations the encoder refuses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("cannot encode bundle options: main module name is empty")]
    EmptyMainModuleName,
    #[error("cannot encode bundle options: bytecode requires the hermes engine")]
    BytecodeRequiresHermes,
}

/// Encode bundle options into a server-relative bundle URL path
pub fn bundle_url_path(options: &BundleOptions) -> Result<String, EncodeError> {
    if options.main_module_name.is_empty() {
        return Err(EncodeError::EmptyMainModuleName);
    }
    if options.bytecode && options.engine != JsEngine::Hermes {
        return Err(EncodeError::BytecodeRequiresHermes);
    }

    let module_path = options
        .main_module_name
        .strip_suffix(".js")
        .unwrap_or(&options.main_module_name);

    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("platform", options.platform.as_str());
    query.append_pair("dev", bool_str(options.dev));
    query.append_pair("minify", bool_str(options.minify));
    query.append_pair("lazy", bool_str(options.lazy));
    query.append_pair("engine", options.engine.as_str());
    query.append_pair("bytecode", bool_str(options.bytecode));
    query.append_pair("isExporting", bool_str(options.is_exporting));
    query.append_pair("baseUrl", &options.base_url);
    if let Some(dom_root) = &options.dom_root {
        query.append_pair("domRoot", dom_root);
    }

    Ok(format!(
        "/{}.bundle?{}",
        module_path.trim_start_matches('/'),
        query.finish()
    ))
}

const fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
