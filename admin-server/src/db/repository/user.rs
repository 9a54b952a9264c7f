//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserAccessUpdate, UserCredentials, UserRegister, UserRole};
use sqlx::SqlitePool;

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> RepoResult<Option<UserCredentials>> {
    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT cod_usuario AS id, nome_usuario AS name, username_usuario AS username, password_usuario AS password_hash, tipo_usuario AS role, conta_ativa AS is_active FROM usuario WHERE username_usuario = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT cod_usuario AS id, nome_usuario AS name, username_usuario AS username, email_usuario AS email, tipo_usuario AS role, conta_ativa AS is_active FROM usuario WHERE cod_usuario = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT cod_usuario AS id, nome_usuario AS name, username_usuario AS username, email_usuario AS email, tipo_usuario AS role, conta_ativa AS is_active FROM usuario ORDER BY nome_usuario ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// True when either the login name or the email is already taken
pub async fn exists_username_or_email(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT cod_usuario FROM usuario WHERE username_usuario = ? OR email_usuario = ? LIMIT 1",
    )
    .bind(username)
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

/// Insert a regular, active account
///
/// The duplicate check and the insert share one transaction; the UNIQUE
/// constraints catch whatever slips between concurrent writers.
pub async fn register(pool: &SqlitePool, data: UserRegister) -> RepoResult<User> {
    let mut tx = pool.begin().await?;

    let taken: Option<i64> = sqlx::query_scalar(
        "SELECT cod_usuario FROM usuario WHERE username_usuario = ? OR email_usuario = ? LIMIT 1",
    )
    .bind(&data.username)
    .bind(&data.email)
    .fetch_optional(&mut *tx)
    .await?;
    if taken.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Username '{}' or email '{}' already registered",
            data.username, data.email
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO usuario (nome_usuario, username_usuario, password_usuario, email_usuario, tipo_usuario, conta_ativa) VALUES (?, ?, ?, ?, ?, 1) RETURNING cod_usuario",
    )
    .bind(&data.name)
    .bind(&data.username)
    .bind(&data.password_hash)
    .bind(&data.email)
    .bind(UserRole::Regular)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Change role and active flag; the other columns are left alone
pub async fn update_access(
    pool: &SqlitePool,
    id: i64,
    data: UserAccessUpdate,
) -> RepoResult<User> {
    let rows = sqlx::query(
        "UPDATE usuario SET tipo_usuario = ?, conta_ativa = ? WHERE cod_usuario = ?",
    )
    .bind(data.role)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn count_admins(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuario WHERE tipo_usuario = ?")
        .bind(UserRole::Admin)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Create an active admin account if no admin exists yet.
///
/// Returns `true` when an account was inserted.
pub async fn ensure_admin(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuario WHERE tipo_usuario = ?")
        .bind(UserRole::Admin)
        .fetch_one(&mut *tx)
        .await?;
    if admins > 0 {
        return Ok(false);
    }

    sqlx::query(
        "INSERT INTO usuario (nome_usuario, username_usuario, password_usuario, email_usuario, tipo_usuario, conta_ativa) VALUES (?, ?, ?, ?, ?, 1)",
    )
    .bind("Administrador")
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .bind(UserRole::Admin)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(true)
}
