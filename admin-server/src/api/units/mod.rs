//! Unit of measure API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/sistema/admin/unidades", get(handler::list))
        .route(
            "/sistema/admin/unidades/nova",
            get(handler::create_page).post(handler::create),
        )
        .route(
            "/sistema/admin/unidades/editar/{id}",
            get(handler::edit_page).post(handler::update),
        )
        .route("/sistema/admin/unidades/excluir/{id}", post(handler::delete))
}
