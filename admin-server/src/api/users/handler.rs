//! User management Handlers

use axum::{
    Form,
    extract::State,
    response::Response,
};
use axum_extra::extract::PrivateCookieJar;
use serde_json::json;
use shared::models::UserAccessForm;
use shared::{AppError, AppResult, ErrorCode};

use crate::api::{RecordId, reject_to};
use crate::auth::SessionUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::web::flash::{self, FlashLevel};
use crate::web::render;

const LIST_PATH: &str = "/sistema/admin/usuarios";

fn not_found() -> AppError {
    AppError::with_message(ErrorCode::UserNotFound, "Usuário não encontrado.")
}

/// GET /sistema/admin/usuarios
pub async fn list(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
) -> AppResult<Response> {
    let users = user::find_all(&state.pool).await?;
    Ok(render(jar, "usuarios.html", Some(current), json!({ "users": users })))
}

/// GET /sistema/admin/usuarios/editar/{cod}
pub async fn edit_page(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
) -> AppResult<Response> {
    match user::find_by_id(&state.pool, cod).await? {
        Some(found) => Ok(render(
            jar,
            "editar_usuario.html",
            Some(current),
            json!({ "user": found }),
        )),
        None => reject_to(not_found(), jar, &state, LIST_PATH),
    }
}

/// POST /sistema/admin/usuarios/editar/{cod} - 修改角色与启用状态
pub async fn update(
    State(state): State<ServerState>,
    current: SessionUser,
    jar: PrivateCookieJar,
    RecordId(cod): RecordId,
    Form(form): Form<UserAccessForm>,
) -> AppResult<Response> {
    let access = match form.validate() {
        Ok(access) => access,
        Err(e) => {
            return reject_to(e, jar, &state, &format!("{LIST_PATH}/editar/{cod}"));
        }
    };

    match user::update_access(&state.pool, cod, access).await {
        Ok(updated) => {
            security_log!(
                "INFO",
                "user_access_changed",
                operator_id = current.user_id,
                user_id = updated.id,
                role = updated.role.code(),
                is_active = updated.is_active
            );
            Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "Usuário atualizado com sucesso!",
                LIST_PATH,
            ))
        }
        Err(RepoError::NotFound(_)) => reject_to(not_found(), jar, &state, LIST_PATH),
        Err(e) => Err(e.into()),
    }
}
