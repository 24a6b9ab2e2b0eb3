// Configuration module entry point
// Loads startup configuration from file, environment and defaults

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, RouteConfig, ServerConfig};

use crate::error::ConfigError;

/// Config file looked up when no path is given (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix for environment overrides, e.g. `HELLO_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "HELLO";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// A missing file is not an error; defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("route.target", "resource:file:/tmp/app/data/my-file.txt")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_grace", 5)?
            .set_default("http.server_name", "hello-file-route")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::temp_file_path;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("hello-missing-config").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.route.target, "resource:file:/tmp/app/data/my-file.txt");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.logging.access_log_file.is_none());
        assert!(cfg.performance.max_connections.is_none());
        assert_eq!(cfg.performance.connection_timeout().as_secs(), 30);
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_file_path("config").with_extension("toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090
workers = 2

[route]
target = "resource:file:/srv/data/greeting.txt"

[performance]
read_timeout = 5
write_timeout = 60
max_connections = 16
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.route.target, "resource:file:/srv/data/greeting.txt");
        assert_eq!(cfg.performance.max_connections, Some(16));
        assert_eq!(cfg.performance.connection_timeout().as_secs(), 60);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        // No other test reads the shutdown grace from a fresh load
        const VAR: &str = "HELLO_PERFORMANCE__SHUTDOWN_GRACE";

        let path = temp_file_path("config_env").with_extension("toml");
        std::fs::write(&path, "[performance]\nshutdown_grace = 7\n").unwrap();

        let from_file = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(from_file.performance.shutdown_grace, 7);

        std::env::set_var(VAR, "9");
        let from_env = Config::load_from(path.to_str().unwrap());
        let defaults_only = Config::load_from("hello-missing-config");
        std::env::remove_var(VAR);

        assert_eq!(from_env.unwrap().performance.shutdown_grace, 9);
        assert_eq!(defaults_only.unwrap().performance.shutdown_grace, 9);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::load_from("hello-missing-config").unwrap();
        cfg.server.host = "not an ip".to_string();
        assert!(matches!(cfg.socket_addr(), Err(ConfigError::InvalidAddress { .. })));
    }
}
