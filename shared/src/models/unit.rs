//! Unit of measure Model

use serde::{Deserialize, Serialize};

use super::required;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Unit {
    pub id: i64,
    pub name: String,
    /// Short symbol (`kg`, `un`, ...)
    pub abbreviation: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UnitForm {
    #[serde(rename = "nome_unidade")]
    pub name: String,
    #[serde(rename = "sigla_unidade")]
    pub abbreviation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInput {
    pub name: String,
    pub abbreviation: String,
}

impl UnitForm {
    pub fn validate(self) -> Result<UnitInput, AppError> {
        Ok(UnitInput {
            name: required(&self.name, "nome_unidade")?,
            abbreviation: required(&self.abbreviation, "sigla_unidade")?,
        })
    }
}
