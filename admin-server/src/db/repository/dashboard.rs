//! Dashboard Repository (read-only)

use super::RepoResult;
use shared::models::{CashEntryKind, DashboardSummary, RecentSale};
use sqlx::SqlitePool;

const RECENT_SALES_LIMIT: i64 = 5;

async fn count(pool: &SqlitePool, sql: &str) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
    Ok(n)
}

/// Cash balance: Σentrada − Σsaida, a missing sum counts as zero
pub async fn cash_balance(pool: &SqlitePool) -> RepoResult<f64> {
    let balance: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE((SELECT SUM(valor) FROM caixa WHERE tipo = ?1), 0) - COALESCE((SELECT SUM(valor) FROM caixa WHERE tipo = ?2), 0) AS REAL)",
    )
    .bind(CashEntryKind::Entrada.as_str())
    .bind(CashEntryKind::Saida.as_str())
    .fetch_one(pool)
    .await?;
    Ok(balance)
}

/// Last sales with the seller's display name, newest first
pub async fn recent_sales(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<RecentSale>> {
    let sales = sqlx::query_as::<_, RecentSale>(
        "SELECT v.cod_venda AS id, CAST(v.total AS REAL) AS total, v.data_venda AS sold_at, u.nome_usuario AS seller_name FROM venda v JOIN usuario u ON v.cod_usuario = u.cod_usuario ORDER BY v.data_venda DESC, v.cod_venda DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(sales.into_iter().map(RecentSale::with_label).collect())
}

pub async fn summary(pool: &SqlitePool) -> RepoResult<DashboardSummary> {
    Ok(DashboardSummary {
        total_products: count(pool, "SELECT COUNT(*) FROM produto").await?,
        total_categories: count(pool, "SELECT COUNT(*) FROM categoria_produto").await?,
        total_sales: count(pool, "SELECT COUNT(*) FROM venda").await?,
        cash_balance: cash_balance(pool).await?,
        recent_sales: recent_sales(pool, RECENT_SALES_LIMIT).await?,
    })
}
