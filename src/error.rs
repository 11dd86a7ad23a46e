use std::fmt;

/// Boxed error type used at the driver boundary.
///
/// Pool and connection implementations report failures as whatever error type
/// they like, boxed; the runner folds them into [`Error`] variants without
/// losing the original cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for the transaction lifecycle.
///
/// Each variant names the step of the lifecycle that failed; the underlying
/// driver or work error is always carried as the `source`, so the first
/// genuine failure reaches the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pool could not hand out a connection.
    #[error("failed to acquire connection from pool")]
    Acquisition(#[source] BoxError),

    /// Disabling autocommit or setting the session timezone failed.
    #[error("failed to configure connection: {step}")]
    Configuration {
        step: ConfigStep,
        #[source]
        source: BoxError,
    },

    /// The caller-supplied work returned an error or panicked.
    #[error("transaction work failed")]
    Work(#[source] BoxError),

    /// The commit failed; the transaction was rolled back.
    #[error("failed to commit transaction")]
    Commit(#[source] BoxError),

    /// Rollback or close failed.
    ///
    /// Reported as the outcome only when close fails after an otherwise fully
    /// successful transaction; cleanup failures during unwinding are logged
    /// and the triggering cause is reported instead.
    #[error("connection cleanup failed: {op}")]
    Cleanup {
        op: CleanupOp,
        #[source]
        source: BoxError,
    },
}

/// Configuration step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStep {
    /// `set_auto_commit(false)` failed; no transaction was started.
    Autocommit,
    /// The session-timezone statement failed.
    Timezone,
}

impl fmt::Display for ConfigStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigStep::Autocommit => f.write_str("disable autocommit"),
            ConfigStep::Timezone => f.write_str("set session timezone"),
        }
    }
}

/// Cleanup operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOp {
    Rollback,
    Close,
}

impl fmt::Display for CleanupOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupOp::Rollback => f.write_str("rollback"),
            CleanupOp::Close => f.write_str("close"),
        }
    }
}

/// Result type alias for transaction outcomes.
pub type Result<T> = std::result::Result<T, Error>;
