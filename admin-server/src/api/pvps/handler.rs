//! PVP API Handlers

use axum::{
    Form,
    extract::State,
    response::Response,
};
use axum_extra::extract::PrivateCookieJar;
use serde_json::json;
use shared::models::PvpForm;
use shared::{AppError, AppResult, ErrorCode};

use crate::api::{RecordId, reject_to};
use crate::auth::SessionUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, pvp};
use crate::web::flash::{self, FlashLevel};
use crate::web::render;

const LIST_PATH: &str = "/sistema/admin/pvps";
const CREATE_PATH: &str = "/sistema/admin/pvps/cadastrar";

fn edit_path(cod: i64) -> String {
    format!("{LIST_PATH}/editar/{cod}")
}

fn not_found() -> AppError {
    AppError::with_message(ErrorCode::PvpNotFound, "PVP não encontrado.")
}

/// GET /sistema/admin/pvps
pub async fn list(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
) -> AppResult<Response> {
    let pvps = pvp::find_all(&state.pool).await?;
    Ok(render(jar, "pvps.html", Some(current), json!({ "pvps": pvps })))
}

/// GET /sistema/admin/pvps/cadastrar
pub async fn create_page(current: SessionUser, jar: PrivateCookieJar) -> Response {
    render(jar, "cadastrar_pvp.html", Some(current), json!({}))
}

/// POST /sistema/admin/pvps/cadastrar
pub async fn create(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    Form(form): Form<PvpForm>,
) -> AppResult<Response> {
    let data = match form.into_create() {
        Ok(data) => data,
        Err(e) => return reject_to(e, jar, &state, CREATE_PATH),
    };

    match pvp::create(&state.pool, data).await {
        Ok(created) => {
            tracing::info!(pvp_id = created.id, kind = created.kind.as_str(), "PVP created");
            Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "PVP cadastrado com sucesso!",
                LIST_PATH,
            ))
        }
        Err(RepoError::Duplicate(_)) => reject_to(
            AppError::with_message(
                ErrorCode::GlobalPvpAlreadyActive,
                "Já existe um PVP Global ativo. Inative o PVP existente antes de cadastrar um novo.",
            ),
            jar,
            &state,
            CREATE_PATH,
        ),
        Err(e) => Err(e.into()),
    }
}

/// GET /sistema/admin/pvps/editar/{cod}
pub async fn edit_page(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
) -> AppResult<Response> {
    match pvp::find_by_id(&state.pool, cod).await? {
        Some(found) => Ok(render(
            jar,
            "editar_pvp.html",
            Some(current),
            json!({ "pvp": found }),
        )),
        None => reject_to(not_found(), jar, &state, LIST_PATH),
    }
}

/// POST /sistema/admin/pvps/editar/{cod}
pub async fn update(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
    Form(form): Form<PvpForm>,
) -> AppResult<Response> {
    let data = match form.into_update() {
        Ok(data) => data,
        Err(e) => return reject_to(e, jar, &state, &edit_path(cod)),
    };

    match pvp::update(&state.pool, cod, data).await {
        Ok(updated) => {
            tracing::info!(pvp_id = updated.id, is_active = updated.is_active, "PVP updated");
            Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "PVP atualizado com sucesso!",
                LIST_PATH,
            ))
        }
        Err(RepoError::Duplicate(_)) => reject_to(
            AppError::with_message(
                ErrorCode::GlobalPvpAlreadyActive,
                "Já existe outro PVP Global ativo. Inative o PVP existente antes de ativar este.",
            ),
            jar,
            &state,
            &edit_path(cod),
        ),
        Err(RepoError::NotFound(_)) => reject_to(not_found(), jar, &state, LIST_PATH),
        Err(e) => Err(e.into()),
    }
}

/// POST /sistema/admin/pvps/excluir/{cod}
pub async fn delete(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
) -> AppResult<Response> {
    let err = match pvp::delete(&state.pool, cod).await {
        Ok(()) => {
            tracing::info!(pvp_id = cod, "PVP deleted");
            return Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "PVP excluído com sucesso!",
                LIST_PATH,
            ));
        }
        Err(RepoError::InUse(reason)) => {
            tracing::info!(pvp_id = cod, %reason, "PVP delete refused");
            AppError::with_message(
                ErrorCode::PvpInUse,
                "Não foi possível excluir o PVP. Verifique se ele não está em uso por uma categoria.",
            )
        }
        Err(RepoError::NotFound(_)) => not_found(),
        Err(e) => return Err(e.into()),
    };
    reject_to(err, jar, &state, LIST_PATH)
}
