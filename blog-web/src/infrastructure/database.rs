use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, info};

const SCHEMA: &str = include_str!("../../schema.sql");

/// Where connections come from. Cheap to clone; holds no open connection.
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid DATABASE_URL: {database_url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        Ok(Self { options })
    }

    pub(crate) async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// Drops and recreates every table.
    pub async fn init_schema(&self) -> Result<()> {
        let mut conn = self
            .connect()
            .await
            .context("failed to open database")?;

        sqlx::raw_sql(SCHEMA)
            .execute(&mut conn)
            .await
            .context("failed to apply schema")?;

        conn.close().await.context("failed to close database")?;
        info!("database schema initialized");
        Ok(())
    }
}

/// The connection of a single request: opened on first use, closed at teardown.
#[derive(Clone)]
pub(crate) struct RequestDb {
    database: Database,
    conn: Arc<Mutex<Option<SqliteConnection>>>,
}

impl RequestDb {
    pub(crate) fn new(database: Database) -> Self {
        Self {
            database,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) async fn acquire(
        &self,
    ) -> Result<MappedMutexGuard<'_, SqliteConnection>, sqlx::Error> {
        let mut slot = self.conn.lock().await;
        let conn = match slot.take() {
            Some(conn) => conn,
            None => {
                debug!("opening request connection");
                self.database.connect().await?
            }
        };

        Ok(MutexGuard::map(slot, move |slot| slot.insert(conn)))
    }

    #[cfg(test)]
    pub(crate) async fn is_open(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    pub(crate) async fn close(&self) -> Result<(), sqlx::Error> {
        let conn = self.conn.lock().await.take();
        match conn {
            Some(conn) => {
                debug!("closing request connection");
                conn.close().await
            }
            None => Ok(()),
        }
    }
}
