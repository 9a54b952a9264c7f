//! Category Model

use serde::{Deserialize, Serialize};

use super::{optional, required};
use crate::error::AppError;

/// Product category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Linked PVP (`pvp_categoria`)
    pub pvp_id: Option<i64>,
}

/// List row joined with the PVP name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CategoryListRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub pvp_name: Option<String>,
}

/// Create / edit form
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CategoryForm {
    #[serde(rename = "nome_categoria")]
    pub name: String,
    #[serde(rename = "descricao_categoria")]
    pub description: Option<String>,
    /// Empty select value means "no PVP"
    #[serde(rename = "pvp_categoria")]
    pub pvp_id: Option<String>,
}

/// Validated category input, used for both create and update
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub pvp_id: Option<i64>,
}

pub type CategoryCreate = CategoryInput;
pub type CategoryUpdate = CategoryInput;

impl CategoryForm {
    pub fn validate(self) -> Result<CategoryInput, AppError> {
        let name = required(&self.name, "nome_categoria")?;
        let pvp_id = match optional(self.pvp_id) {
            None => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::validation("PVP inválido.").with_detail("pvp_categoria", raw.as_str())
            })?),
        };
        Ok(CategoryInput {
            name,
            description: optional(self.description),
            pvp_id,
        })
    }
}
