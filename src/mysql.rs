//! sqlx MySQL implementation of the pool and connection boundary.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, MySql, MySqlPool};

use crate::connection::{SqlConnection, SqlPool};
use crate::error::BoxError;

/// A MySQL connection borrowed from a [`MySqlPool`].
pub struct MySqlPooledConnection {
    conn: PoolConnection<MySql>,
}

#[async_trait]
impl SqlPool for MySqlPool {
    type Conn = MySqlPooledConnection;

    async fn acquire(&self) -> Result<Self::Conn, BoxError> {
        let conn = sqlx::Pool::acquire(self).await?;
        Ok(MySqlPooledConnection { conn })
    }
}

#[async_trait]
impl SqlConnection for MySqlPooledConnection {
    async fn set_auto_commit(&mut self, enabled: bool) -> Result<(), BoxError> {
        let sql = if enabled {
            "SET autocommit = 1"
        } else {
            "SET autocommit = 0"
        };
        sqlx::query(sql).execute(&mut *self.conn).await?;
        Ok(())
    }

    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<(), BoxError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.to_string());
        }
        query.execute(&mut *self.conn).await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        sqlx::query("COMMIT").execute(&mut *self.conn).await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BoxError> {
        sqlx::query("ROLLBACK").execute(&mut *self.conn).await?;
        Ok(())
    }

    /// Detaches the connection from the pool and closes it for real, rather
    /// than returning it: its session state (autocommit off, timezone) must
    /// not leak into a later borrower.
    async fn close(self) -> Result<(), BoxError> {
        self.conn.detach().close().await?;
        Ok(())
    }
}
