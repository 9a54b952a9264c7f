//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryListRow, CategoryUpdate};
use sqlx::{SqliteConnection, SqlitePool};

/// Categories joined with their PVP name, ordered by name
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<CategoryListRow>> {
    let rows = sqlx::query_as::<_, CategoryListRow>(
        "SELECT c.cod_categoria AS id, c.nome_categoria AS name, c.descricao_categoria AS description, p.nome_pvp AS pvp_name FROM categoria_produto c LEFT JOIN pvp p ON c.pvp_categoria = p.cod_pvp ORDER BY c.nome_categoria ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT cod_categoria AS id, nome_categoria AS name, descricao_categoria AS description, pvp_categoria AS pvp_id FROM categoria_produto WHERE cod_categoria = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

async fn ensure_pvp_exists(conn: &mut SqliteConnection, pvp_id: Option<i64>) -> RepoResult<()> {
    let Some(pvp_id) = pvp_id else {
        return Ok(());
    };
    let found: Option<i64> = sqlx::query_scalar("SELECT cod_pvp FROM pvp WHERE cod_pvp = ?")
        .bind(pvp_id)
        .fetch_optional(conn)
        .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepoError::Validation(format!("PVP {pvp_id} not found"))),
    }
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let mut tx = pool.begin().await?;
    ensure_pvp_exists(&mut *tx, data.pvp_id).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO categoria_produto (nome_categoria, descricao_categoria, pvp_categoria) VALUES (?, ?, ?) RETURNING cod_categoria",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.pvp_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let mut tx = pool.begin().await?;
    ensure_pvp_exists(&mut *tx, data.pvp_id).await?;

    let rows = sqlx::query(
        "UPDATE categoria_produto SET nome_categoria = ?, descricao_categoria = ?, pvp_categoria = ? WHERE cod_categoria = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.pvp_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category. Refused with `InUse` while products reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM produto WHERE cod_categoria = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if products > 0 {
        return Err(RepoError::InUse(format!(
            "Category {id} is used by {products} product(s)"
        )));
    }

    let rows = sqlx::query("DELETE FROM categoria_produto WHERE cod_categoria = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }

    tx.commit().await?;
    Ok(())
}
