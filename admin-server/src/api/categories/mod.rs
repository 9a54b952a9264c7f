//! Category API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/sistema/admin/categorias", get(handler::list))
        .route(
            "/sistema/admin/categorias/cadastrar",
            get(handler::create_page).post(handler::create),
        )
        .route(
            "/sistema/admin/categorias/editar/{cod}",
            get(handler::edit_page).post(handler::update),
        )
        .route(
            "/sistema/admin/categorias/excluir/{cod}",
            post(handler::delete),
        )
}
