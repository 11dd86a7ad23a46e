use async_trait::async_trait;

use crate::error::BoxError;

/// Supplier of pooled connections.
///
/// This is the boundary the runner depends on; pooling policy, concurrency
/// limits and timeouts all live behind it. See [`crate::mysql`] for the sqlx
/// implementation.
#[async_trait]
pub trait SqlPool: Send + Sync {
    type Conn: SqlConnection;

    /// Borrows a connection from the pool.
    async fn acquire(&self) -> Result<Self::Conn, BoxError>;
}

/// A connection borrowed from the pool for the lifetime of one transaction.
///
/// The runner owns the connection exclusively from acquisition to close and
/// drives every call in a fixed order: `set_auto_commit(false)`, the session
/// timezone statement via [`execute`](SqlConnection::execute), the work, then
/// `commit` or `rollback`, then `close`. `close` consumes the connection, so
/// it cannot be closed twice or used afterwards.
///
/// Implementations report failures by returning `Err`; panics raised inside
/// an operation are also tolerated and normalized by the runner.
#[async_trait]
pub trait SqlConnection: Send {
    /// Enables or disables autocommit for the session.
    async fn set_auto_commit(&mut self, enabled: bool) -> Result<(), BoxError>;

    /// Executes a single statement with positional parameters.
    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<(), BoxError>;

    /// Commits the current transaction.
    async fn commit(&mut self) -> Result<(), BoxError>;

    /// Rolls back the current transaction.
    async fn rollback(&mut self) -> Result<(), BoxError>;

    /// Closes the connection, consuming it.
    async fn close(self) -> Result<(), BoxError>;
}
