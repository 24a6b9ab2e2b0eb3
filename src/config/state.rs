// Application state module
// Immutable route plus live connection accounting

use std::sync::atomic::AtomicUsize;

use super::types::Config;
use crate::error::ConfigError;
use crate::route::Route;

/// Application state shared by all connections
pub struct AppState {
    pub config: Config,
    /// Resolved once at startup, never replaced
    pub route: Route,
    pub active_connections: AtomicUsize,
}

impl AppState {
    /// Resolve the configured route and build the shared state
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let route = Route::from_config(&config.route)?;
        Ok(Self {
            config,
            route,
            active_connections: AtomicUsize::new(0),
        })
    }
}
