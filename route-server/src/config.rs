//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::store::DEFAULT_STORE_PATH;

/// Address to listen on.
pub const ADDR_VAR: &str = "ROUTE_SERVER_ADDR";
/// Optional JSON stop catalog; the built-in sample is used when unset.
pub const CATALOG_VAR: &str = "ROUTE_SERVER_CATALOG";
/// JSON file the route list is saved to.
pub const STORE_VAR: &str = "ROUTE_SERVER_STORE";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Errors from reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable held a value that could not be parsed
    #[error("invalid {var} '{value}': {message}")]
    Invalid {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub catalog_path: Option<PathBuf>,
    pub store_path: PathBuf,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr = match get(ADDR_VAR) {
            Some(value) => value
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::Invalid {
                    var: ADDR_VAR,
                    message: e.to_string(),
                    value,
                })?,
            None => SocketAddr::from(DEFAULT_ADDR),
        };

        Ok(Self {
            addr,
            catalog_path: get(CATALOG_VAR).map(PathBuf::from),
            store_path: get(STORE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            catalog_path: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.store_path, PathBuf::from("routes.json"));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ADDR_VAR, "0.0.0.0:8080"),
            (CATALOG_VAR, "/etc/route-server/stops.json"),
            (STORE_VAR, "/var/lib/route-server/routes.json"),
        ]))
        .unwrap();

        assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/route-server/stops.json"))
        );
        assert_eq!(
            config.store_path,
            PathBuf::from("/var/lib/route-server/routes.json")
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config =
            ServerConfig::from_lookup(lookup(&[(ADDR_VAR, "  "), (CATALOG_VAR, "")])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn invalid_address() {
        let err = ServerConfig::from_lookup(lookup(&[(ADDR_VAR, "localhost")])).unwrap_err();
        let ConfigError::Invalid { var, value, .. } = &err;
        assert_eq!(*var, ADDR_VAR);
        assert_eq!(value, "localhost");
        assert!(err.to_string().starts_with("invalid ROUTE_SERVER_ADDR 'localhost'"));
    }
}
