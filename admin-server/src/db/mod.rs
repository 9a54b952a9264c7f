//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use std::str::FromStr;
use std::time::Duration;

use shared::{AppError, AppResult};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::auth::password;
use crate::core::BootstrapAdmin;

/// Database service: owns the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file with WAL mode and apply migrations
    pub async fn new(db_path: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(5000))
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(path = db_path, "Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(pool).await
    }

    /// Single-connection in-memory database, migrated
    pub async fn in_memory() -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .foreign_keys(true);

        // One connection: every pooled connection would otherwise get its own empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> AppResult<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::debug!("Database migrations applied");
        Ok(Self { pool })
    }

    /// Create the configured admin account unless an admin already exists
    pub async fn bootstrap_admin(&self, admin: &BootstrapAdmin) -> AppResult<()> {
        let password_hash = password::hash_password(&admin.password)?;
        let created = repository::user::ensure_admin(
            &self.pool,
            &admin.username,
            &admin.email,
            &password_hash,
        )
        .await?;
        if created {
            tracing::info!(username = %admin.username, "Bootstrap admin account created");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caixa.db");
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('usuario', 'pvp', 'categoria_produto', 'unidade_medida', 'produto', 'venda', 'caixa')",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(tables, 7);

        let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_runs_once() {
        let db = DbService::in_memory().await.unwrap();
        let admin = BootstrapAdmin {
            username: "admin".into(),
            password: "admin123".into(),
            email: "admin@localhost".into(),
        };
        db.bootstrap_admin(&admin).await.unwrap();
        db.bootstrap_admin(&admin).await.unwrap();

        assert_eq!(repository::user::count_admins(&db.pool).await.unwrap(), 1);
        let creds = repository::user::find_by_username(&db.pool, "admin")
            .await
            .unwrap()
            .unwrap();
        assert!(password::verify_password("admin123", &creds.password_hash));
    }
}
