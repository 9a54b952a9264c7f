//! PVP Repository
//!
//! At most one row may be `tipo_pvp = 'global' AND ativo = 1`. Writes check
//! this inside their transaction; a partial unique index enforces it too.

use super::{RepoError, RepoResult};
use shared::models::{PVP_KIND_GLOBAL, Pvp, PvpCreate, PvpOption, PvpUpdate};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Pvp>> {
    let pvps = sqlx::query_as::<_, Pvp>(
        "SELECT cod_pvp AS id, nome_pvp AS name, percentual AS percentage, tipo_pvp AS kind, ativo AS is_active FROM pvp ORDER BY nome_pvp ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(pvps)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Pvp>> {
    let pvp = sqlx::query_as::<_, Pvp>(
        "SELECT cod_pvp AS id, nome_pvp AS name, percentual AS percentage, tipo_pvp AS kind, ativo AS is_active FROM pvp WHERE cod_pvp = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(pvp)
}

/// Active profiles, for the category create form
pub async fn find_active_options(pool: &SqlitePool) -> RepoResult<Vec<PvpOption>> {
    let options = sqlx::query_as::<_, PvpOption>(
        "SELECT cod_pvp AS id, nome_pvp AS name FROM pvp WHERE ativo = 1 ORDER BY nome_pvp ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(options)
}

/// All profiles, for the category edit form
pub async fn find_options(pool: &SqlitePool) -> RepoResult<Vec<PvpOption>> {
    let options = sqlx::query_as::<_, PvpOption>(
        "SELECT cod_pvp AS id, nome_pvp AS name FROM pvp ORDER BY nome_pvp ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(options)
}

/// Id of an active global profile other than `exclude`
async fn active_global_id(
    conn: &mut SqliteConnection,
    exclude: Option<i64>,
) -> RepoResult<Option<i64>> {
    let id: Option<i64> = sqlx::query_scalar(
        "SELECT cod_pvp FROM pvp WHERE tipo_pvp = ?1 AND ativo = 1 AND (?2 IS NULL OR cod_pvp != ?2) LIMIT 1",
    )
    .bind(PVP_KIND_GLOBAL)
    .bind(exclude)
    .fetch_optional(conn)
    .await?;
    Ok(id)
}

/// Insert an active profile.
///
/// A global profile is refused with `Duplicate` while another global is active.
pub async fn create(pool: &SqlitePool, data: PvpCreate) -> RepoResult<Pvp> {
    let mut tx = pool.begin().await?;

    if data.kind.is_global()
        && let Some(existing) = active_global_id(&mut *tx, None).await?
    {
        return Err(RepoError::Duplicate(format!(
            "Active global PVP already exists ({existing})"
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO pvp (nome_pvp, percentual, tipo_pvp, ativo) VALUES (?, ?, ?, 1) RETURNING cod_pvp",
    )
    .bind(&data.name)
    .bind(data.percentage)
    .bind(data.kind.as_str())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create PVP".into()))
}

/// Replace every column of a profile.
///
/// Activating a global profile while a different one is active is refused
/// with `Duplicate`; the row itself is excluded from the check.
pub async fn update(pool: &SqlitePool, id: i64, data: PvpUpdate) -> RepoResult<Pvp> {
    let mut tx = pool.begin().await?;

    if data.kind.is_global()
        && data.is_active
        && let Some(existing) = active_global_id(&mut *tx, Some(id)).await?
    {
        return Err(RepoError::Duplicate(format!(
            "Active global PVP already exists ({existing})"
        )));
    }

    let rows = sqlx::query(
        "UPDATE pvp SET nome_pvp = ?, percentual = ?, tipo_pvp = ?, ativo = ? WHERE cod_pvp = ?",
    )
    .bind(&data.name)
    .bind(data.percentage)
    .bind(data.kind.as_str())
    .bind(data.is_active)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("PVP {id} not found")));
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("PVP {id} not found")))
}

/// Delete a profile. Refused with `InUse` while a category links to it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let linked: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM categoria_produto WHERE pvp_categoria = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if linked > 0 {
        return Err(RepoError::InUse(format!(
            "PVP {id} is linked to {linked} category(ies)"
        )));
    }

    let rows = sqlx::query("DELETE FROM pvp WHERE cod_pvp = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("PVP {id} not found")));
    }

    tx.commit().await?;
    Ok(())
}
