//! Bundler collaborator module
//!
//! The pieces of the external bundling subsystem the DOM component handler
//! depends on: bundle option types, the bundle-URL-path encoder, and
//! filesystem module resolution. Deliberately minimal — the actual bundling
//! and transformation pipeline lives outside this server.

pub mod encode;
pub mod options;
pub mod resolve;

pub use encode::{bundle_url_path, EncodeError};
pub use options::{BundleDefaults, BundleOptions, JsEngine, Platform};
pub use resolve::{ModuleResolver, NodeModulesResolver};
