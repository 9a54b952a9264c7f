//! Auth API Handlers

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use serde_json::json;
use shared::models::{AvailabilityForm, LoginForm, RegisterForm};
use shared::{AppError, AppResult, ErrorCode};

use crate::api::{DASHBOARD_PATH, reject_to};
use crate::auth::{SessionUser, end_session, password, start_session};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::web::flash::{self, FlashLevel};
use crate::web::render;

/// GET / - 按会话状态跳转
pub async fn home(State(state): State<ServerState>, jar: PrivateCookieJar) -> Response {
    match SessionUser::from_jar(&jar) {
        Some(user) if user.is_admin() => Redirect::to(DASHBOARD_PATH).into_response(),
        Some(_) => flash::redirect_with(
            jar,
            &state,
            FlashLevel::Info,
            "Sua conta não tem permissão de acesso ao painel.",
            "/logout",
        ),
        None => Redirect::to("/login").into_response(),
    }
}

/// GET /cadastro
pub async fn register_page(jar: PrivateCookieJar) -> Response {
    let user = SessionUser::from_jar(&jar);
    render(jar, "cadastro.html", user, json!({}))
}

/// POST /cadastro - 注册普通用户 (启用状态)
pub async fn register(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let input = match form.validate(password::hash_password) {
        Ok(input) => input,
        Err(e) => return reject_to(e, jar, &state, "/cadastro"),
    };

    match user::register(&state.pool, input).await {
        Ok(created) => {
            tracing::info!(user_id = created.id, username = %created.username, "User registered");
            Ok(flash::redirect_with(
                jar,
                &state,
                FlashLevel::Success,
                "Cadastro realizado com sucesso! Você já pode fazer login.",
                "/login",
            ))
        }
        Err(RepoError::Duplicate(_)) => reject_to(
            AppError::with_message(
                ErrorCode::UsernameOrEmailExists,
                "Nome de usuário ou e-mail já cadastrado.",
            ),
            jar,
            &state,
            "/cadastro",
        ),
        Err(e) => Err(e.into()),
    }
}

/// POST /verificar_usuario_email - `existe` | `disponivel`
pub async fn check_availability(
    State(state): State<ServerState>,
    Form(form): Form<AvailabilityForm>,
) -> AppResult<&'static str> {
    let taken =
        user::exists_username_or_email(&state.pool, form.username.trim(), form.email.trim())
            .await?;
    Ok(if taken { "existe" } else { "disponivel" })
}

/// GET /login
pub async fn login_page(jar: PrivateCookieJar) -> Response {
    let user = SessionUser::from_jar(&jar);
    render(jar, "login.html", user, json!({}))
}

/// POST /login
pub async fn login(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let username = form.username.trim();
    let password = form.password.trim();

    let credentials = match user::find_by_username(&state.pool, username).await? {
        Some(found) if password::verify_password(password, &found.password_hash) => Some(found),
        Some(_) => None,
        None => {
            password::verify_unknown_user(password);
            None
        }
    };

    let Some(credentials) = credentials else {
        security_log!("WARN", "login_failed", username = username.to_string());
        let err =
            AppError::with_message(ErrorCode::InvalidCredentials, "Usuário ou senha inválidos.");
        return reject_to(err, jar, &state, "/login");
    };

    if !credentials.is_active {
        security_log!("WARN", "login_disabled", user_id = credentials.id);
        let err = AppError::with_message(
            ErrorCode::AccountDisabled,
            "Esta conta está desativada. Entre em contato com o administrador.",
        );
        return reject_to(err, jar, &state, "/login");
    }

    let session = SessionUser::from(&credentials);
    let jar = start_session(jar, &session, state.config.secure_cookies)?;
    security_log!("INFO", "login_success", user_id = session.user_id);

    if session.is_admin() {
        return Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response());
    }

    let err = AppError::with_message(
        ErrorCode::AdminRequired,
        "Acesso permitido apenas para administradores.",
    );
    reject_to(err, jar, &state, "/login")
}

/// GET /logout
pub async fn logout(State(state): State<ServerState>, jar: PrivateCookieJar) -> Response {
    if let Some(user) = SessionUser::from_jar(&jar) {
        security_log!("INFO", "logout", user_id = user.user_id);
    }
    let jar = end_session(jar);
    flash::redirect_with(
        jar,
        &state,
        FlashLevel::Success,
        "Você saiu da sua conta.",
        "/login",
    )
}
