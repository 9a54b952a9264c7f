//! Caixa Admin Server - 收银系统后台管理
//!
//! # 模块结构
//!
//! ```text
//! admin-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # 密码、会话 Cookie、管理员门禁
//! ├── web/           # Flash 通知、页面视图
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 连接池和仓储
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;
pub mod web;

// Re-export 公共类型
pub use auth::SessionUser;
pub use core::{Config, Server, ServerError, ServerState};
pub use db::DbService;
pub use shared::{AppError, AppResult, ErrorCode};

pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, then set up logging from the environment
pub fn setup_environment() -> Result<Config, ServerError> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}
