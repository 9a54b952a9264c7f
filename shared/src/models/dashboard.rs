//! Dashboard Model

use serde::{Deserialize, Serialize};

/// Cash-register movement direction (`caixa.tipo`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashEntryKind {
    Entrada,
    Saida,
}

impl CashEntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            CashEntryKind::Entrada => "entrada",
            CashEntryKind::Saida => "saida",
        }
    }
}

/// Recent sale row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecentSale {
    pub id: i64,
    pub total: f64,
    /// Sale time (Unix millis)
    pub sold_at: i64,
    pub seller_name: String,
    /// `sold_at` as `YYYY-MM-DD HH:MM`, filled after the query
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub sold_at_label: String,
}

impl RecentSale {
    pub fn with_label(mut self) -> Self {
        self.sold_at_label = crate::util::format_millis(self.sold_at);
        self
    }
}

/// Summary cards and recent sales table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub total_categories: i64,
    pub total_sales: i64,
    /// Σentrada − Σsaida
    pub cash_balance: f64,
    pub recent_sales: Vec<RecentSale>,
}
