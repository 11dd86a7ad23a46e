use std::future::Future;
use std::pin::Pin;

use crate::attempt::{attempt, attempt_query, attempt_with};
use crate::connection::{SqlConnection, SqlPool};
use crate::error::{BoxError, CleanupOp, ConfigStep, Error};
use crate::resource;

/// Orchestrates the lifecycle of one transaction per call.
///
/// For every [`run_in_transaction`](TransactionRunner::run_in_transaction)
/// invocation the runner acquires a connection, disables autocommit, pins the
/// session timezone, runs the caller's work, then commits on success or rolls
/// back on failure, and always closes the connection last. Exactly one
/// outcome is delivered per invocation; no panic escapes into caller code.
pub struct TransactionRunner<P> {
    pool: P,
    set_timezone: &'static str,
}

impl<P: SqlPool> TransactionRunner<P> {
    /// Creates a runner using the embedded session-timezone statement.
    pub fn new(pool: P) -> Self {
        Self::with_timezone_statement(pool, resource::set_timezone_sql())
    }

    /// Creates a runner with a caller-supplied session-timezone statement.
    pub fn with_timezone_statement(pool: P, set_timezone: &'static str) -> Self {
        Self { pool, set_timezone }
    }

    /// The statement executed on every connection before work runs.
    pub fn timezone_statement(&self) -> &'static str {
        self.set_timezone
    }

    /// Executes `work` within a transaction on a connection configured with
    /// autocommit disabled and the session timezone pinned.
    ///
    /// Failure handling, step by step:
    ///
    /// - acquisition fails: the failure is reported; nothing was borrowed, so
    ///   no cleanup runs.
    /// - disabling autocommit fails: the connection is closed and the failure
    ///   reported. No transaction began, so rollback is skipped.
    /// - the timezone statement, the work, or the commit fails: rollback,
    ///   then close, then the triggering failure is reported.
    /// - close fails after an earlier failure: logged only; the original
    ///   cause is reported. Close fails after a fully successful commit: the
    ///   close failure is the outcome, since there is no earlier cause to
    ///   preserve.
    ///
    /// A step that panics (in the work closure, or inside any driver call)
    /// produces the same outcome as one returning an equivalent error.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sql_tx_runner::TransactionRunner;
    /// use sql_tx_runner::connection::SqlConnection;
    ///
    /// # async fn example(pool: sqlx::MySqlPool) -> sql_tx_runner::Result<()> {
    /// let runner = TransactionRunner::new(pool);
    /// let inserted = runner
    ///     .run_in_transaction(|conn| {
    ///         Box::pin(async move {
    ///             conn.execute("INSERT INTO users (name) VALUES (?)", &["Alice"])
    ///                 .await?;
    ///             Ok(1u64)
    ///         })
    ///     })
    ///     .await?;
    /// assert_eq!(inserted, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_in_transaction<T, F>(&self, work: F) -> crate::Result<T>
    where
        F: for<'c> FnOnce(
            &'c mut P::Conn,
        )
            -> Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send + 'c>>,
        T: Send,
    {
        let mut conn = match attempt(self.pool.acquire()).await {
            Ok(conn) => conn,
            Err(cause) => return Err(Error::Acquisition(cause)),
        };

        if let Err(cause) = attempt(conn.set_auto_commit(false)).await {
            // No transaction began, so rollback would be meaningless and may
            // be invalid against the driver. Close straight away.
            let error = Error::Configuration {
                step: ConfigStep::Autocommit,
                source: cause,
            };
            return Err(close_reporting(conn, error).await);
        }

        let sql = self.set_timezone;
        if let Err(cause) = attempt_query(conn.execute(sql, &[]), sql, &[]).await {
            let error = Error::Configuration {
                step: ConfigStep::Timezone,
                source: cause,
            };
            return Err(rollback_then_close(conn, error).await);
        }

        let value = match attempt_with(|| work(&mut conn)).await {
            Ok(value) => value,
            Err(cause) => return Err(rollback_then_close(conn, Error::Work(cause)).await),
        };

        if let Err(cause) = attempt(conn.commit()).await {
            return Err(rollback_then_close(conn, Error::Commit(cause)).await);
        }

        match attempt(conn.close()).await {
            Ok(()) => Ok(value),
            Err(cause) => {
                tracing::error!(error = %cause, "closing connection failed");
                Err(Error::Cleanup {
                    op: CleanupOp::Close,
                    source: cause,
                })
            }
        }
    }
}

/// Rolls back and closes the connection, reporting the triggering `cause`.
///
/// Failures of the rollback itself are logged and never shadow `cause`.
async fn rollback_then_close<C: SqlConnection>(mut conn: C, cause: Error) -> Error {
    if let Err(rollback_error) = attempt(conn.rollback()).await {
        tracing::error!(error = %rollback_error, "rollback failed");
    }
    close_reporting(conn, cause).await
}

/// Closes the connection, reporting the triggering `cause`.
///
/// A close failure here occurs strictly during unwinding from an earlier
/// failure, so it is logged and `cause` is reported unchanged.
async fn close_reporting<C: SqlConnection>(conn: C, cause: Error) -> Error {
    if let Err(close_error) = attempt(conn.close()).await {
        tracing::error!(error = %close_error, "closing connection failed");
    }
    cause
}
