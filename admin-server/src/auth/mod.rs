//! 认证模块
//!
//! - [`password`] - Argon2 密码哈希
//! - [`session`] - 私有 Cookie 会话 ([`SessionUser`])
//! - [`middleware`] - 管理员门禁 ([`require_admin`])

pub mod middleware;
pub mod password;
pub mod session;

pub use middleware::{ADMIN_PREFIX, require_admin};
pub use session::{SessionUser, end_session, start_session};
