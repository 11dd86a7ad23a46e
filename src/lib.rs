//! # sql-tx-runner
//!
//! A fail-safe transaction execution harness for pooled async SQL
//! connections.
//!
//! ## Features
//!
//! - **Guaranteed cleanup**: every acquired connection is closed exactly
//!   once, on every path, success or failure
//! - **Configured before use**: autocommit is disabled and the session
//!   timezone pinned before caller work ever runs
//! - **Panic-safe**: a step that panics produces the same outcome as one
//!   that returns an error; no panic escapes into caller code
//! - **Cause fidelity**: the first genuine failure is what the caller sees;
//!   failures during cleanup are logged, never propagated in its place
//! - **Driver-agnostic**: the runner speaks to a small [`connection::SqlPool`]
//!   / [`connection::SqlConnection`] boundary; a sqlx MySQL implementation is
//!   included
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! sqlx = { version = "0.8", features = ["mysql", "runtime-tokio"] }
//! sql-tx-runner = "0.1"
//! ```
//!
//! ```rust,no_run
//! use sql_tx_runner::connection::SqlConnection;
//! use sql_tx_runner::TransactionRunner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = sqlx::MySqlPool::connect("mysql://localhost/test").await?;
//! let runner = TransactionRunner::new(pool);
//!
//! runner
//!     .run_in_transaction(|conn| {
//!         Box::pin(async move {
//!             conn.execute("INSERT INTO users (name) VALUES (?)", &["Alice"])
//!                 .await?;
//!             conn.execute(
//!                 "INSERT INTO profiles (user, bio) VALUES (?, ?)",
//!                 &["Alice", "Engineer"],
//!             )
//!             .await?;
//!             Ok(())
//!         })
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Both inserts commit together; if either fails, or the closure panics, the
//! transaction is rolled back and the connection still closed.
//!
//! ## Lifecycle
//!
//! Each [`TransactionRunner::run_in_transaction`] call walks a fixed
//! sequence:
//!
//! 1. acquire a connection from the pool
//! 2. disable autocommit
//! 3. execute the session-timezone statement (embedded at compile time,
//!    loaded once)
//! 4. run the caller's work
//! 5. commit on success, roll back on failure
//! 6. close the connection, always last
//!
//! If autocommit cannot be disabled, no transaction ever began, so the
//! connection is closed without a rollback. Rollback and close failures
//! during unwinding are recorded with `tracing` and never mask the cause
//! that triggered them. The one exception: when everything through commit
//! succeeded and only the close fails, the close failure is the outcome —
//! there is no earlier cause to preserve.
//!
//! ## Error handling
//!
//! Outcomes are [`Result<T>`] with an [`Error`] naming the failed lifecycle
//! step; the underlying driver or work error is carried as its `source`.
//! With the `anyhow` feature, `run_in_transaction_anyhow` offers an
//! `anyhow::Result` surface instead.
//!
//! ## Custom backends
//!
//! Implement [`connection::SqlPool`] and [`connection::SqlConnection`] for
//! your driver to run transactions over it; the harness drives only those
//! five operations (`set_auto_commit`, `execute`, `commit`, `rollback`,
//! `close`) plus `acquire`.
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at
//! your option.

pub mod attempt;
pub mod connection;
pub mod error;
pub mod mysql;
pub mod resource;
pub mod runner;

#[cfg(feature = "anyhow")]
mod anyhow_compat;

pub use error::{BoxError, CleanupOp, ConfigStep, Error, Result};
pub use runner::TransactionRunner;

#[cfg(feature = "anyhow")]
pub use anyhow_compat::run_in_transaction_anyhow;

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::connection::{SqlConnection, SqlPool};
    pub use crate::error::{BoxError, Error, Result};
    pub use crate::runner::TransactionRunner;
}
