//! PVP (price variation profile) Model

use serde::{Deserialize, Serialize};

use super::required;
use crate::error::{AppError, ErrorCode};

/// Stored `tipo_pvp` value of the store-wide profile
pub const PVP_KIND_GLOBAL: &str = "global";

/// Profile kind; only `global` carries a rule, anything else is free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PvpKind {
    Global,
    Other(String),
}

impl PvpKind {
    pub fn is_global(&self) -> bool {
        matches!(self, PvpKind::Global)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PvpKind::Global => PVP_KIND_GLOBAL,
            PvpKind::Other(kind) => kind,
        }
    }
}

impl From<String> for PvpKind {
    fn from(value: String) -> Self {
        if value == PVP_KIND_GLOBAL {
            PvpKind::Global
        } else {
            PvpKind::Other(value)
        }
    }
}

impl From<PvpKind> for String {
    fn from(kind: PvpKind) -> Self {
        match kind {
            PvpKind::Global => PVP_KIND_GLOBAL.to_string(),
            PvpKind::Other(kind) => kind,
        }
    }
}

/// PVP entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Pvp {
    pub id: i64,
    pub name: String,
    /// Price variation in percent
    pub percentage: f64,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub kind: PvpKind,
    pub is_active: bool,
}

/// Select-box entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PvpOption {
    pub id: i64,
    pub name: String,
}

/// Create / edit form. `ativo` is only rendered on the edit page.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PvpForm {
    #[serde(rename = "nome_pvp")]
    pub name: String,
    #[serde(rename = "percentual")]
    pub percentage: String,
    #[serde(rename = "tipo_pvp")]
    pub kind: String,
    #[serde(rename = "ativo")]
    pub active: Option<String>,
}

/// New profile; always stored active
#[derive(Debug, Clone)]
pub struct PvpCreate {
    pub name: String,
    pub percentage: f64,
    pub kind: PvpKind,
}

#[derive(Debug, Clone)]
pub struct PvpUpdate {
    pub name: String,
    pub percentage: f64,
    pub kind: PvpKind,
    pub is_active: bool,
}

/// Parse a percentage typed by a user. Accepts `,` as decimal separator.
pub fn parse_percentage(raw: &str) -> Result<f64, AppError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(
            AppError::with_message(ErrorCode::InvalidPercentage, "Percentual inválido.")
                .with_detail("percentual", raw),
        ),
    }
}

impl PvpForm {
    fn parts(&self) -> Result<(String, f64, PvpKind), AppError> {
        let name = required(&self.name, "nome_pvp")?;
        let percentage = parse_percentage(&self.percentage)?;
        let kind = PvpKind::from(required(&self.kind, "tipo_pvp")?);
        Ok((name, percentage, kind))
    }

    pub fn into_create(self) -> Result<PvpCreate, AppError> {
        let (name, percentage, kind) = self.parts()?;
        Ok(PvpCreate {
            name,
            percentage,
            kind,
        })
    }

    pub fn into_update(self) -> Result<PvpUpdate, AppError> {
        let (name, percentage, kind) = self.parts()?;
        Ok(PvpUpdate {
            name,
            percentage,
            kind,
            is_active: crate::util::checkbox(self.active.as_deref()),
        })
    }
}
