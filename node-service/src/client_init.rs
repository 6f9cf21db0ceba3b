//! 客户端 thick 模式初始化
//!
//! The native client can only be initialized once per process. The first
//! connection attempt triggers it; later attempts are no-ops and failures are
//! swallowed so the driver falls back to its default library lookup.

use std::fmt::Display;
use std::sync::OnceLock;

use oracle::InitParams;

/// Result of the single initialization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// This attempt loaded the client library.
    Initialized,
    /// The library had been loaded before the attempt.
    AlreadyInitialized,
    /// The attempt failed; the error was swallowed.
    Failed,
}

/// Process-wide, never-reset guard around client initialization.
pub struct ClientInitGuard {
    outcome: OnceLock<InitOutcome>,
}

impl ClientInitGuard {
    pub const fn new() -> Self {
        Self {
            outcome: OnceLock::new(),
        }
    }

    /// Runs `init` the first time it is called and returns the recorded
    /// outcome on every call.
    pub fn ensure<F, E>(&self, init: F) -> InitOutcome
    where
        F: FnOnce() -> Result<bool, E>,
        E: Display,
    {
        *self.outcome.get_or_init(|| match init() {
            Ok(true) => {
                tracing::info!("Oracle client initialized in thick mode");
                InitOutcome::Initialized
            }
            Ok(false) => InitOutcome::AlreadyInitialized,
            Err(e) => {
                tracing::debug!(error = %e, "Oracle client init skipped");
                InitOutcome::Failed
            }
        })
    }

    /// Outcome of the attempt, if one has been made.
    #[cfg(test)]
    pub fn outcome(&self) -> Option<InitOutcome> {
        self.outcome.get().copied()
    }
}

impl Default for ClientInitGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard shared by every connection in the process.
pub static THICK_CLIENT: ClientInitGuard = ClientInitGuard::new();

/// Loads the Oracle client library from `lib_dir`.
pub fn init_thick_client(lib_dir: &str) -> oracle::Result<bool> {
    let mut params = InitParams::new();
    params.oracle_client_lib_dir(lib_dir)?;
    params.init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_init_runs_once() {
        let guard = ClientInitGuard::new();
        let calls = Cell::new(0);
        let init = || {
            calls.set(calls.get() + 1);
            Ok::<_, String>(true)
        };

        assert_eq!(guard.ensure(init), InitOutcome::Initialized);
        assert_eq!(guard.ensure(init), InitOutcome::Initialized);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failure_is_swallowed_and_not_retried() {
        let guard = ClientInitGuard::new();
        assert_eq!(guard.outcome(), None);

        let outcome = guard.ensure(|| Err::<bool, _>("DPI-1047: Cannot locate a 64-bit Oracle Client library"));
        assert_eq!(outcome, InitOutcome::Failed);

        let retried = guard.ensure(|| Ok::<_, String>(true));
        assert_eq!(retried, InitOutcome::Failed);
        assert_eq!(guard.outcome(), Some(InitOutcome::Failed));
    }

    #[test]
    fn test_already_initialized() {
        let guard = ClientInitGuard::default();
        assert_eq!(
            guard.ensure(|| Ok::<_, String>(false)),
            InitOutcome::AlreadyInitialized
        );
    }
}
