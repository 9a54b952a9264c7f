//! User Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::required;
use crate::error::{AppError, ErrorCode};

/// Account role, stored as `tipo_usuario`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[repr(i32)]
pub enum UserRole {
    Admin = 1,
    Regular = 2,
}

impl UserRole {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl TryFrom<i32> for UserRole {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UserRole::Admin),
            2 => Ok(UserRole::Regular),
            other => Err(
                AppError::with_message(ErrorCode::InvalidRole, "Tipo de usuário inválido.")
                    .with_detail("tipo_usuario", other),
            ),
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: i32 = s.trim().parse().map_err(|_| {
            AppError::with_message(ErrorCode::InvalidRole, "Tipo de usuário inválido.")
                .with_detail("tipo_usuario", s)
        })?;
        Self::try_from(code)
    }
}

/// User entity (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login name
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Login lookup row, including the stored hash
#[derive(Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserCredentials {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Registration form (`/cadastro`)
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct RegisterForm {
    #[serde(rename = "nome")]
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// Validated registration input; the password is already hashed
#[derive(Debug, Clone)]
pub struct UserRegister {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl RegisterForm {
    /// Validate the form fields, handing the raw password to `hash`
    pub fn validate<E>(
        self,
        hash: impl FnOnce(&str) -> Result<String, E>,
    ) -> Result<UserRegister, AppError>
    where
        E: std::fmt::Display,
    {
        let name = required(&self.name, "nome")?;
        let username = required(&self.username, "username")?;
        let email = required(&self.email, "email")?;
        if self.password.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "O campo 'senha' é obrigatório.",
            )
            .with_detail("field", "senha"));
        }
        let password_hash =
            hash(&self.password).map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        Ok(UserRegister {
            name,
            username,
            email,
            password_hash,
        })
    }
}

/// Login form (`/login`); values are trimmed before use
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// Availability check form (`/verificar_usuario_email`)
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Admin edit form for role and active flag
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UserAccessForm {
    #[serde(rename = "tipo_usuario")]
    pub role: String,
    /// Checkbox: absent when unchecked
    #[serde(rename = "conta_ativa")]
    pub active: Option<String>,
}

/// Validated role / active-flag change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAccessUpdate {
    pub role: UserRole,
    pub is_active: bool,
}

impl UserAccessForm {
    pub fn validate(self) -> Result<UserAccessUpdate, AppError> {
        Ok(UserAccessUpdate {
            role: self.role.parse()?,
            is_active: crate::util::checkbox(self.active.as_deref()),
        })
    }
}
