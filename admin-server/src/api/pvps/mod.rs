//! PVP API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/sistema/admin/pvps", get(handler::list))
        .route(
            "/sistema/admin/pvps/cadastrar",
            get(handler::create_page).post(handler::create),
        )
        .route(
            "/sistema/admin/pvps/editar/{cod}",
            get(handler::edit_page).post(handler::update),
        )
        .route("/sistema/admin/pvps/excluir/{cod}", post(handler::delete))
}
