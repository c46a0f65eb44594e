// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub bundler: BundlerConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Bundler configuration
///
/// `project_root` anchors dependency resolution for the hosted app;
/// `metro_root` is the bundler's root for relative module naming and
/// falls back to the project root when not set separately.
#[derive(Debug, Deserialize, Clone)]
pub struct BundlerConfig {
    pub project_root: PathBuf,
    #[serde(default)]
    pub metro_root: Option<PathBuf>,
    /// Serve development (unminified, HMR-capable) bundles
    pub dev: bool,
    /// Minify served bundles
    pub minify: bool,
}

impl BundlerConfig {
    /// The bundler root used for relative module naming
    pub fn metro_root(&self) -> &Path {
        self.metro_root.as_deref().unwrap_or(&self.project_root)
    }
}
