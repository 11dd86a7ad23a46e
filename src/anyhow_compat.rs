use std::future::Future;
use std::pin::Pin;

use crate::connection::SqlPool;
use crate::error::BoxError;
use crate::runner::TransactionRunner;

/// Executes work within a transaction, using `anyhow::Error` end to end.
///
/// Convenience wrapper around
/// [`TransactionRunner::run_in_transaction`] for callers whose work closures
/// return `anyhow::Result<T>`. Lifecycle semantics are identical.
///
/// # Examples
///
/// ```rust,no_run
/// use sql_tx_runner::connection::SqlConnection;
/// use sql_tx_runner::{run_in_transaction_anyhow, TransactionRunner};
///
/// # async fn example(pool: sqlx::MySqlPool) -> anyhow::Result<()> {
/// let runner = TransactionRunner::new(pool);
/// run_in_transaction_anyhow(&runner, |conn| {
///     Box::pin(async move {
///         conn.execute("DELETE FROM sessions WHERE expired = ?", &["1"])
///             .await
///             .map_err(|e| anyhow::anyhow!(e))?;
///         Ok(())
///     })
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_in_transaction_anyhow<P, T, F>(
    runner: &TransactionRunner<P>,
    work: F,
) -> anyhow::Result<T>
where
    P: SqlPool,
    T: Send,
    F: for<'c> FnOnce(
            &'c mut P::Conn,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'c>>
        + Send
        + 'static,
{
    runner
        .run_in_transaction(move |conn| {
            Box::pin(async move {
                work(conn).await.map_err(|e| -> BoxError { e.into() })
            })
        })
        .await
        .map_err(anyhow::Error::from)
}
