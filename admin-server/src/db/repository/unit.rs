//! Unit of Measure Repository

use super::{RepoError, RepoResult};
use shared::models::{Unit, UnitInput};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Unit>> {
    let units = sqlx::query_as::<_, Unit>(
        "SELECT cod_unidade AS id, nome_unidade AS name, sigla_unidade AS abbreviation FROM unidade_medida ORDER BY nome_unidade ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(units)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Unit>> {
    let unit = sqlx::query_as::<_, Unit>(
        "SELECT cod_unidade AS id, nome_unidade AS name, sigla_unidade AS abbreviation FROM unidade_medida WHERE cod_unidade = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(unit)
}

pub async fn create(pool: &SqlitePool, data: UnitInput) -> RepoResult<Unit> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO unidade_medida (nome_unidade, sigla_unidade) VALUES (?, ?) RETURNING cod_unidade",
    )
    .bind(&data.name)
    .bind(&data.abbreviation)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create unit".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UnitInput) -> RepoResult<Unit> {
    let rows = sqlx::query(
        "UPDATE unidade_medida SET nome_unidade = ?, sigla_unidade = ? WHERE cod_unidade = ?",
    )
    .bind(&data.name)
    .bind(&data.abbreviation)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Unit {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Unit {id} not found")))
}

/// Delete a unit. Refused with `InUse` while products reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM produto WHERE cod_unidade = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if products > 0 {
        return Err(RepoError::InUse(format!(
            "Unit {id} is used by {products} product(s)"
        )));
    }

    let rows = sqlx::query("DELETE FROM unidade_medida WHERE cod_unidade = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Unit {id} not found")));
    }

    tx.commit().await?;
    Ok(())
}
