//! Shared server state

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;

use super::{Config, Result};
use crate::db::DbService;

/// 服务器状态 - 所有请求共享
///
/// Cheap to clone: the pool and config are reference counted.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    cookie_key: Key,
}

impl ServerState {
    /// Open the database, apply migrations and seed the bootstrap admin
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db = DbService::new(&config.database_path).await?;
        if let Some(admin) = &config.bootstrap_admin {
            db.bootstrap_admin(admin).await?;
        }

        Ok(Self::with_pool(config.clone(), db.pool))
    }

    /// Build state around an existing pool (tests use an in-memory one)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let cookie_key = derive_cookie_key(&config.session_secret);
        Self {
            config: Arc::new(config),
            pool,
            cookie_key,
        }
    }

    pub fn cookie_key(&self) -> &Key {
        &self.cookie_key
    }
}

impl FromRef<ServerState> for Key {
    fn from_ref(state: &ServerState) -> Self {
        state.cookie_key.clone()
    }
}

/// Private-cookie key: SHA-512 of the configured secret (64 bytes)
fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
