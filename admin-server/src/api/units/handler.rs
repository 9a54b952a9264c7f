//! Unit of measure Handlers

use axum::{
    Form,
    extract::State,
    response::Response,
};
use axum_extra::extract::PrivateCookieJar;
use serde_json::json;
use shared::models::UnitForm;
use shared::{AppError, AppResult, ErrorCode};

use crate::api::{RecordId, reject_to};
use crate::auth::SessionUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, unit};
use crate::web::flash::{self, FlashLevel};
use crate::web::render;

const LIST_PATH: &str = "/sistema/admin/unidades";
const CREATE_PATH: &str = "/sistema/admin/unidades/nova";

fn not_found() -> AppError {
    AppError::with_message(ErrorCode::UnitNotFound, "Unidade não encontrada.")
}

/// GET /sistema/admin/unidades
pub async fn list(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
) -> AppResult<Response> {
    let units = unit::find_all(&state.pool).await?;
    Ok(render(jar, "unidades.html", Some(current), json!({ "units": units })))
}

/// GET /sistema/admin/unidades/nova
pub async fn create_page(current: SessionUser, jar: PrivateCookieJar) -> Response {
    render(
        jar,
        "unidades_form.html",
        Some(current),
        json!({ "action": "Nova", "unit": null }),
    )
}

/// POST /sistema/admin/unidades/nova
pub async fn create(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    Form(form): Form<UnitForm>,
) -> AppResult<Response> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(e) => return reject_to(e, jar, &state, CREATE_PATH),
    };
    let created = unit::create(&state.pool, data).await?;
    tracing::info!(unit_id = created.id, "Unit created");
    Ok(flash::redirect_with(
        jar,
        &state,
        FlashLevel::Success,
        "Unidade cadastrada com sucesso!",
        LIST_PATH,
    ))
}

/// GET /sistema/admin/unidades/editar/{id}
pub async fn edit_page(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
    RecordId(id): RecordId,
) -> AppResult<Response> {
    match unit::find_by_id(&state.pool, id).await? {
        Some(found) => Ok(render(
            jar,
            "unidades_form.html",
            Some(current),
            json!({ "action": "Editar", "unit": found }),
        )),
        None => reject_to(not_found(), jar, &state, LIST_PATH),
    }
}

/// POST /sistema/admin/unidades/editar/{id}
pub async fn update(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    RecordId(id): RecordId,
    Form(form): Form<UnitForm>,
) -> AppResult<Response> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(e) => return reject_to(e, jar, &state, &format!("{LIST_PATH}/editar/{id}")),
    };

    match unit::update(&state.pool, id, data).await {
        Ok(updated) => {
            tracing::info!(unit_id = updated.id, "Unit updated");
            Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "Unidade atualizada com sucesso!",
                LIST_PATH,
            ))
        }
        Err(RepoError::NotFound(_)) => reject_to(not_found(), jar, &state, LIST_PATH),
        Err(e) => Err(e.into()),
    }
}

/// POST /sistema/admin/unidades/excluir/{id}
pub async fn delete(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    RecordId(id): RecordId,
) -> AppResult<Response> {
    let err = match unit::delete(&state.pool, id).await {
        Ok(()) => {
            tracing::info!(unit_id = id, "Unit deleted");
            return Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "Unidade excluída com sucesso!",
                LIST_PATH,
            ));
        }
        Err(RepoError::InUse(reason)) => {
            tracing::info!(unit_id = id, %reason, "Unit delete refused");
            AppError::with_message(
                ErrorCode::UnitInUse,
                "Não foi possível excluir a unidade. Verifique se ela não está em uso por produtos.",
            )
        }
        Err(RepoError::NotFound(_)) => not_found(),
        Err(e) => return Err(e.into()),
    };
    reject_to(err, jar, &state, LIST_PATH)
}
