//! Data models
//!
//! Shared between admin-server and whatever renders its page views.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//!
//! Form payloads keep the field names of the HTML forms (`nome_pvp`,
//! `percentual`, ...) and are validated into typed inputs before they reach
//! the repositories.

pub mod category;
pub mod dashboard;
pub mod pvp;
pub mod unit;
pub mod user;

// Re-exports
pub use category::*;
pub use dashboard::*;
pub use pvp::*;
pub use unit::*;
pub use user::*;

use crate::error::{AppError, ErrorCode};

/// Trim a required text field, rejecting blank input
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("O campo '{field}' é obrigatório."))
                .with_detail("field", field),
        );
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, mapping blank input to `None`
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
