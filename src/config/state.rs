// Application state module
// Shared per-process state handed to every connection

use crate::config::Config;
use crate::dom::DomComponentsHandler;

/// Application state
///
/// Built once at startup and shared across all connections. The DOM
/// components handler carries the only mutable process-wide state (its
/// preflight cache); everything else is read-only configuration.
pub struct AppState {
    pub config: Config,
    pub dom: DomComponentsHandler,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        // Requests arriving without a Host header still need an absolute
        // bundle URL, so the server's own address serves as the base.
        let fallback_host = format!("{}:{}", config.server.host, config.server.port);
        let dom = DomComponentsHandler::new(&config.bundler, fallback_host);
        Self { config, dom }
    }
}
