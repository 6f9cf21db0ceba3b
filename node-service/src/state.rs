//! Application state for node service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::driver::{ExecuteOptions, OciDriver, OracleDriver};
use crate::service::ExecutionService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub executor: Arc<ExecutionService>,
}

impl AppState {
    /// Creates the state with the Instant Client driver.
    pub fn new(config: AppConfig) -> Self {
        let driver = Arc::new(OciDriver::new(config.oracle_client_lib_dir.clone()));
        Self::with_driver(config, driver)
    }

    /// Creates the state with an explicit driver.
    pub fn with_driver(config: AppConfig, driver: Arc<dyn OracleDriver>) -> Self {
        let options = ExecuteOptions {
            fetch_array_size: config.fetch_array_size,
            ..Default::default()
        };
        Self {
            executor: Arc::new(ExecutionService::new(driver, options)),
            config,
        }
    }
}
