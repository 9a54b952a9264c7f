//! Error codes for the Caixa admin panel
//!
//! Organized by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User account errors
//! - 4xxx: PVP errors
//! - 5xxx: Category errors
//! - 6xxx: Unit of measure errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as its `u16` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Row is still referenced elsewhere
    InUse = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Users ====================
    /// User not found
    UserNotFound = 3001,
    /// Username or email already registered
    UsernameOrEmailExists = 3002,
    /// Role value is not one of the known roles
    InvalidRole = 3003,

    // ==================== 4xxx: PVP ====================
    /// PVP not found
    PvpNotFound = 4001,
    /// Another global PVP is already active
    GlobalPvpAlreadyActive = 4002,
    /// PVP is referenced by a category
    PvpInUse = 4003,
    /// Percentage is not a valid number
    InvalidPercentage = 4004,

    // ==================== 5xxx: Category ====================
    /// Category not found
    CategoryNotFound = 5001,
    /// Category is referenced by products
    CategoryInUse = 5002,

    // ==================== 6xxx: Unit ====================
    /// Unit of measure not found
    UnitNotFound = 6001,
    /// Unit of measure is referenced by products
    UnitInUse = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InUse => "Resource is in use",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",

            // Users
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameOrEmailExists => "Username or email already registered",
            ErrorCode::InvalidRole => "Unknown user role",

            // PVP
            ErrorCode::PvpNotFound => "PVP not found",
            ErrorCode::GlobalPvpAlreadyActive => "Another global PVP is already active",
            ErrorCode::PvpInUse => "PVP is in use by a category",
            ErrorCode::InvalidPercentage => "Percentage must be a number",

            // Category
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryInUse => "Category is in use by products",

            // Unit
            ErrorCode::UnitNotFound => "Unit of measure not found",
            ErrorCode::UnitInUse => "Unit of measure is in use by products",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InUse),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),

            // Users
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::UsernameOrEmailExists),
            3003 => Ok(ErrorCode::InvalidRole),

            // PVP
            4001 => Ok(ErrorCode::PvpNotFound),
            4002 => Ok(ErrorCode::GlobalPvpAlreadyActive),
            4003 => Ok(ErrorCode::PvpInUse),
            4004 => Ok(ErrorCode::InvalidPercentage),

            // Category
            5001 => Ok(ErrorCode::CategoryNotFound),
            5002 => Ok(ErrorCode::CategoryInUse),

            // Unit
            6001 => Ok(ErrorCode::UnitNotFound),
            6002 => Ok(ErrorCode::UnitInUse),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
