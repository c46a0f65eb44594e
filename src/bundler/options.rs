//! Bundle option types
//!
//! `BundleDefaults` is the open, caller-supplied part of the configuration;
//! `BundleOptions` is the fully-determined set handed to the encoder.

/// Target platform for a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Web,
}

impl Platform {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Web => "web",
        }
    }
}

/// JavaScript engine the bundle targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsEngine {
    Hermes,
    Jsc,
}

impl JsEngine {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hermes => "hermes",
            Self::Jsc => "jsc",
        }
    }
}

/// Caller-supplied bundling defaults
///
/// `main_module_name`, `platform` and `bytecode` are optional because the
/// DOM component handler always overrides them; the remaining optional
/// fields exist so a caller *can* suggest values — the handler's fixed
/// overrides still win on every collision.
#[derive(Debug, Clone, Default)]
pub struct BundleDefaults {
    pub dev: bool,
    pub minify: bool,
    pub main_module_name: Option<String>,
    pub platform: Option<Platform>,
    pub bytecode: Option<bool>,
    pub engine: Option<JsEngine>,
    pub lazy: Option<bool>,
    pub base_url: Option<String>,
    pub is_exporting: Option<bool>,
    pub dom_root: Option<String>,
}

/// Fully-determined bundle options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    pub main_module_name: String,
    pub platform: Platform,
    pub dev: bool,
    pub minify: bool,
    pub bytecode: bool,
    pub engine: JsEngine,
    pub lazy: bool,
    pub base_url: String,
    pub is_exporting: bool,
    pub dom_root: Option<String>,
}

impl BundleOptions {
    /// Merge caller defaults with the fixed DOM-component overrides.
    ///
    /// Overrides strictly take precedence: a caller can tune `dev`/`minify`
    /// but can never displace the entry wiring (`main_module_name`,
    /// `dom_root`, `base_url`) or the web/hermes/lazy/no-bytecode set the
    /// host document depends on. `lazy` stays on so bundler errors are
    /// caught at the async boundary and the entry can recover.
    pub fn for_dom_component(
        defaults: &BundleDefaults,
        main_module_name: impl Into<String>,
        encoded_dom_root: impl Into<String>,
    ) -> Self {
        Self {
            dev: defaults.dev,
            minify: defaults.minify,
            main_module_name: main_module_name.into(),
            platform: Platform::Web,
            bytecode: false,
            engine: JsEngine::Hermes,
            lazy: true,
            base_url: "/".to_string(),
            is_exporting: false,
            dom_root: Some(encoded_dom_root.into()),
        }
    }
}
