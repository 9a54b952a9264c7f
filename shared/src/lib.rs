//! Shared types for the Caixa admin panel
//!
//! Row types, form payloads and the unified error system used by
//! `admin-server` and by anything rendering its page views.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, ErrorBody, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
