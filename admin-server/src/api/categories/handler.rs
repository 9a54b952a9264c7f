//! Category API Handlers

use axum::{
    Form,
    extract::State,
    response::Response,
};
use axum_extra::extract::PrivateCookieJar;
use serde_json::json;
use shared::models::CategoryForm;
use shared::{AppError, AppResult, ErrorCode};

use crate::api::{RecordId, reject_to};
use crate::auth::SessionUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, category, pvp};
use crate::web::flash::{self, FlashLevel};
use crate::web::render;

const LIST_PATH: &str = "/sistema/admin/categorias";
const CREATE_PATH: &str = "/sistema/admin/categorias/cadastrar";

fn edit_path(cod: i64) -> String {
    format!("{LIST_PATH}/editar/{cod}")
}

fn not_found() -> AppError {
    AppError::with_message(ErrorCode::CategoryNotFound, "Categoria não encontrada.")
}

/// `pvp_categoria` names a profile that does not exist
fn unknown_pvp() -> AppError {
    AppError::with_message(ErrorCode::PvpNotFound, "O PVP selecionado não existe.")
}

/// GET /sistema/admin/categorias - 含 PVP 名称
pub async fn list(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
) -> AppResult<Response> {
    let categories = category::find_all(&state.pool).await?;
    Ok(render(
        jar,
        "categorias.html",
        Some(current),
        json!({ "categories": categories }),
    ))
}

/// GET /sistema/admin/categorias/cadastrar - 仅列出启用的 PVP
pub async fn create_page(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
) -> AppResult<Response> {
    let pvps = pvp::find_active_options(&state.pool).await?;
    Ok(render(
        jar,
        "cadastrar_categoria.html",
        Some(current),
        json!({ "pvps": pvps }),
    ))
}

/// POST /sistema/admin/categorias/cadastrar
pub async fn create(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    Form(form): Form<CategoryForm>,
) -> AppResult<Response> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(e) => return reject_to(e, jar, &state, CREATE_PATH),
    };

    match category::create(&state.pool, data).await {
        Ok(created) => {
            tracing::info!(category_id = created.id, "Category created");
            Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "Categoria cadastrada com sucesso!",
                LIST_PATH,
            ))
        }
        Err(RepoError::Validation(_)) => reject_to(unknown_pvp(), jar, &state, CREATE_PATH),
        Err(e) => Err(e.into()),
    }
}

/// GET /sistema/admin/categorias/editar/{cod} - 列出全部 PVP
pub async fn edit_page(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
) -> AppResult<Response> {
    let Some(found) = category::find_by_id(&state.pool, cod).await? else {
        return reject_to(not_found(), jar, &state, LIST_PATH);
    };
    let pvps = pvp::find_options(&state.pool).await?;
    Ok(render(
        jar,
        "editar_categoria.html",
        Some(current),
        json!({ "category": found, "pvps": pvps }),
    ))
}

/// POST /sistema/admin/categorias/editar/{cod}
pub async fn update(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
    Form(form): Form<CategoryForm>,
) -> AppResult<Response> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(e) => return reject_to(e, jar, &state, &edit_path(cod)),
    };

    match category::update(&state.pool, cod, data).await {
        Ok(updated) => {
            tracing::info!(category_id = updated.id, "Category updated");
            Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "Categoria atualizada com sucesso!",
                LIST_PATH,
            ))
        }
        Err(RepoError::NotFound(_)) => reject_to(not_found(), jar, &state, LIST_PATH),
        Err(RepoError::Validation(_)) => reject_to(unknown_pvp(), jar, &state, &edit_path(cod)),
        Err(e) => Err(e.into()),
    }
}

/// POST /sistema/admin/categorias/excluir/{cod}
pub async fn delete(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
) -> AppResult<Response> {
    let err = match category::delete(&state.pool, cod).await {
        Ok(()) => {
            tracing::info!(category_id = cod, "Category deleted");
            return Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "Categoria excluída com sucesso!",
                LIST_PATH,
            ));
        }
        Err(RepoError::InUse(reason)) => {
            tracing::info!(category_id = cod, %reason, "Category delete refused");
            AppError::with_message(
                ErrorCode::CategoryInUse,
                "Não foi possível excluir a categoria. Verifique se ela não está em uso por produtos.",
            )
        }
        Err(RepoError::NotFound(_)) => not_found(),
        Err(e) => return Err(e.into()),
    };
    reject_to(err, jar, &state, LIST_PATH)
}
