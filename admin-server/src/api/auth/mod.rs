//! Auth API 模块 (公共路由)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 按会话跳转 |
//! | /cadastro | GET, POST | 注册 |
//! | /verificar_usuario_email | POST | 用户名/邮箱可用性 |
//! | /login | GET, POST | 登录 |
//! | /logout | GET | 登出 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::home))
        .route("/cadastro", get(handler::register_page).post(handler::register))
        .route("/verificar_usuario_email", post(handler::check_availability))
        .route("/login", get(handler::login_page).post(handler::login))
        .route("/logout", get(handler::logout))
}
