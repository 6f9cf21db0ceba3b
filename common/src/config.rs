//! Environment-driven configuration.

use std::env;

/// Library directory used for the thick-mode client when none is configured.
pub const DEFAULT_ORACLE_CLIENT_LIB_DIR: &str = "/oracle/instantclient_21_9";

/// Rows fetched per round trip.
pub const DEFAULT_FETCH_ARRAY_SIZE: u32 = 100;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8090;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name of the service this config was loaded for.
    pub service_name: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Instant Client directory for the thick-mode init attempt. `None` skips it.
    pub oracle_client_lib_dir: Option<String>,
    /// Fetch array size handed to the driver.
    pub fetch_array_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            oracle_client_lib_dir: Some(DEFAULT_ORACLE_CLIENT_LIB_DIR.to_string()),
            fetch_array_size: DEFAULT_FETCH_ARRAY_SIZE,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the environment for the given service.
    pub fn load_with_service(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| env::var(key).ok())
    }

    fn from_lookup(service_name: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let oracle_client_lib_dir = match lookup("ORACLE_CLIENT_LIB_DIR") {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(dir),
            None => defaults.oracle_client_lib_dir,
        };

        Self {
            service_name: service_name.to_string(),
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            oracle_client_lib_dir,
            fetch_array_size: lookup("ORACLE_FETCH_ARRAY_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.fetch_array_size),
        }
    }
}
