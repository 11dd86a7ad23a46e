//! Fail-safe wrapping of asynchronous steps.
//!
//! Every step of the transaction lifecycle goes through this module, so a
//! step that panics produces the same outcome as one that returns `Err`.
//! Downstream logic never distinguishes the two channels.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

use crate::error::BoxError;

/// Error carrying the message of a caught panic.
#[derive(Debug, thiserror::Error)]
#[error("panicked: {0}")]
pub struct PanicError(pub String);

/// Resolves `fut`, converting a panic during polling into an `Err`.
pub async fn attempt<T, F>(fut: F) -> Result<T, BoxError>
where
    F: Future<Output = Result<T, BoxError>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(panic_error(payload)),
    }
}

/// Invokes `f` and resolves the future it produces, converting a panic
/// raised either synchronously by `f` or during polling into an `Err`.
pub async fn attempt_with<T, F, Fut>(f: F) -> Result<T, BoxError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, BoxError>>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(fut) => attempt(fut).await,
        Err(payload) => Err(panic_error(payload)),
    }
}

/// Like [`attempt`], but logs the failing query text and parameters before
/// propagating the failure.
pub async fn attempt_query<T, F>(fut: F, sql: &str, params: &[&str]) -> Result<T, BoxError>
where
    F: Future<Output = Result<T, BoxError>>,
{
    match attempt(fut).await {
        Ok(result) => Ok(result),
        Err(cause) => {
            tracing::error!(query = sql, ?params, error = %cause, "query failed");
            Err(cause)
        }
    }
}

fn panic_error(payload: Box<dyn Any + Send>) -> BoxError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    Box::new(PanicError(message))
}
