//! Router tests: the full app (admin gate, cookies, flashes) over an in-memory database

use std::collections::HashMap;

use admin_server::api::build_app;
use admin_server::auth::password::hash_password;
use admin_server::db::repository::user;
use admin_server::{Config, DbService, ServerState};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

const ADMIN_USER: &str = "admin";
const ADMIN_PASS: &str = "admin123";

/// Browser stand-in: replays cookies set by earlier responses
struct TestClient {
    app: Router,
    cookies: HashMap<String, String>,
}

impl TestClient {
    fn new(app: Router) -> Self {
        Self {
            app,
            cookies: HashMap::new(),
        }
    }

    async fn send(&mut self, method: &str, uri: &str, form: Option<&[(&str, &str)]>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(fields) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(encode_form(fields))
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            let pair = raw.split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send("GET", uri, None).await
    }

    async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Response<Body> {
        self.send("POST", uri, Some(form)).await
    }

    /// GET a page and return its JSON view
    async fn page(&mut self, uri: &str) -> Value {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        body_json(response).await
    }

    async fn login(&mut self, username: &str, password: &str) -> Response<Body> {
        self.post("/login", &[("username", username), ("senha", password)])
            .await
    }

    fn has_session(&self) -> bool {
        self.cookies.contains_key("caixa_session")
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fn encode(s: &str) -> String {
        s.bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    (b as char).to_string()
                }
                _ => format!("%{b:02X}"),
            })
            .collect()
    }
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    assert!(
        response.status().is_redirection(),
        "expected redirect, got {}",
        response.status()
    );
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn flash_messages(page: &Value, level: &str) -> Vec<String> {
    page["flashes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["level"] == level)
        .map(|f| f["message"].as_str().unwrap().to_string())
        .collect()
}

fn flash_codes(page: &Value) -> Vec<i64> {
    page["flashes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["code"].as_i64())
        .collect()
}

async fn setup() -> (Router, SqlitePool) {
    let db = DbService::in_memory().await.unwrap();
    let config = Config::from_lookup(|_| None).unwrap();
    let state = ServerState::with_pool(config, db.pool.clone());
    user::ensure_admin(
        &db.pool,
        ADMIN_USER,
        "admin@example.com",
        &hash_password(ADMIN_PASS).unwrap(),
    )
    .await
    .unwrap();
    (build_app(&state).with_state(state), db.pool)
}

async fn admin_client(app: &Router) -> TestClient {
    let mut client = TestClient::new(app.clone());
    let response = client.login(ADMIN_USER, ADMIN_PASS).await;
    assert_eq!(location(&response), "/sistema/admin/dashboard");
    client
}

async fn register(client: &mut TestClient, username: &str, email: &str) -> Response<Body> {
    client
        .post(
            "/cadastro",
            &[
                ("nome", "Maria Souza"),
                ("username", username),
                ("email", email),
                ("senha", "segredo1"),
            ],
        )
        .await
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ========== Registration ==========

#[tokio::test]
async fn duplicate_login_name_is_rejected() {
    let (app, pool) = setup().await;
    let mut client = TestClient::new(app);

    let response = register(&mut client, "maria", "maria@example.com").await;
    assert_eq!(location(&response), "/login");
    let page = client.page("/login").await;
    assert_eq!(
        flash_messages(&page, "success"),
        vec!["Cadastro realizado com sucesso! Você já pode fazer login."]
    );

    let response = register(&mut client, "maria", "outra@example.com").await;
    assert_eq!(location(&response), "/cadastro");
    let page = client.page("/cadastro").await;
    assert_eq!(page["template"], "cadastro.html");
    assert_eq!(
        flash_messages(&page, "error"),
        vec!["Nome de usuário ou e-mail já cadastrado."]
    );
    assert_eq!(flash_codes(&page), vec![3002]);

    // admin + maria
    assert_eq!(count(&pool, "usuario").await, 2);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (app, pool) = setup().await;
    let mut client = TestClient::new(app);

    register(&mut client, "maria", "maria@example.com").await;
    let response = register(&mut client, "mariana", "maria@example.com").await;
    assert_eq!(location(&response), "/cadastro");
    assert_eq!(count(&pool, "usuario").await, 2);
}

#[tokio::test]
async fn login_name_and_email_ignore_case() {
    let (app, pool) = setup().await;
    let mut client = TestClient::new(app);
    register(&mut client, "maria", "maria@example.com").await;

    let response = register(&mut client, "Maria", "outra@example.com").await;
    assert_eq!(location(&response), "/cadastro");
    let response = register(&mut client, "joao", "MARIA@Example.com").await;
    assert_eq!(location(&response), "/cadastro");
    assert_eq!(count(&pool, "usuario").await, 2);

    let taken = client
        .post(
            "/verificar_usuario_email",
            &[("username", "MARIA"), ("email", "")],
        )
        .await;
    assert_eq!(body_text(taken).await, "existe");

    // Regular account found under another casing: session set, sent back
    let response = client.login("MARIA", "segredo1").await;
    assert_eq!(location(&response), "/login");
    assert!(client.has_session());
    let page = client.page("/login").await;
    assert_eq!(page["user"]["user_name"], "Maria Souza");
    assert!(flash_codes(&page).ends_with(&[2003]));
}

#[tokio::test]
async fn registration_requires_fields() {
    let (app, pool) = setup().await;
    let mut client = TestClient::new(app);

    let response = client
        .post("/cadastro", &[("nome", "Maria"), ("username", "maria")])
        .await;
    assert_eq!(location(&response), "/cadastro");
    let page = client.page("/cadastro").await;
    assert_eq!(flash_messages(&page, "error").len(), 1);
    assert_eq!(count(&pool, "usuario").await, 1);
}

#[tokio::test]
async fn availability_check() {
    let (app, _pool) = setup().await;
    let mut client = TestClient::new(app);
    register(&mut client, "maria", "maria@example.com").await;

    let taken = client
        .post(
            "/verificar_usuario_email",
            &[("username", "maria"), ("email", "nova@example.com")],
        )
        .await;
    assert_eq!(taken.status(), StatusCode::OK);
    assert_eq!(body_text(taken).await, "existe");

    let free = client
        .post(
            "/verificar_usuario_email",
            &[("username", "joana"), ("email", "joana@example.com")],
        )
        .await;
    assert_eq!(body_text(free).await, "disponivel");
}

// ========== Login ==========

#[tokio::test]
async fn invalid_credentials_are_refused() {
    let (app, _pool) = setup().await;
    let mut client = TestClient::new(app);

    let response = client.login(ADMIN_USER, "wrong").await;
    assert_eq!(location(&response), "/login");
    assert!(!client.has_session());

    let response = client.login("ghost", "whatever").await;
    assert_eq!(location(&response), "/login");
    let page = client.page("/login").await;
    assert_eq!(
        flash_messages(&page, "error"),
        vec!["Usuário ou senha inválidos.", "Usuário ou senha inválidos."]
    );
    assert_eq!(flash_codes(&page), vec![1002, 1002]);
}

#[tokio::test]
async fn login_trims_input() {
    let (app, _pool) = setup().await;
    let mut client = TestClient::new(app);
    let response = client.login("  admin ", " admin123  ").await;
    assert_eq!(location(&response), "/sistema/admin/dashboard");
    assert!(client.has_session());
}

#[tokio::test]
async fn inactive_account_cannot_log_in() {
    let (app, _pool) = setup().await;
    let mut visitor = TestClient::new(app.clone());
    register(&mut visitor, "maria", "maria@example.com").await;

    let mut admin = admin_client(&app).await;
    let users = admin.page("/sistema/admin/usuarios").await;
    let maria_id = users["context"]["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "maria")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    // Unchecked checkbox: `conta_ativa` is absent
    let response = admin
        .post(
            &format!("/sistema/admin/usuarios/editar/{maria_id}"),
            &[("tipo_usuario", "2")],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/usuarios");

    let mut client = TestClient::new(app);
    let response = client.login("maria", "segredo1").await;
    assert_eq!(location(&response), "/login");
    assert!(!client.has_session());
    let page = client.page("/login").await;
    assert_eq!(
        flash_messages(&page, "error"),
        vec!["Esta conta está desativada. Entre em contato com o administrador."]
    );
    assert_eq!(flash_codes(&page), vec![1007]);
}

#[tokio::test]
async fn regular_user_login_is_sent_back() {
    let (app, _pool) = setup().await;
    let mut client = TestClient::new(app);
    register(&mut client, "maria", "maria@example.com").await;

    let response = client.login("maria", "segredo1").await;
    assert_eq!(location(&response), "/login");
    let page = client.page("/login").await;
    assert_eq!(
        flash_messages(&page, "error"),
        vec!["Acesso permitido apenas para administradores."]
    );

    // Home logs a non-admin session out
    let response = client.get("/").await;
    assert_eq!(location(&response), "/logout");
    let response = client.get("/logout").await;
    assert_eq!(location(&response), "/login");
    assert!(!client.has_session());
    let page = client.page("/login").await;
    assert_eq!(
        flash_messages(&page, "info"),
        vec!["Sua conta não tem permissão de acesso ao painel."]
    );
    assert_eq!(flash_messages(&page, "success"), vec!["Você saiu da sua conta."]);
}

#[tokio::test]
async fn home_redirects_by_session() {
    let (app, _pool) = setup().await;
    let mut client = TestClient::new(app.clone());
    assert_eq!(location(&client.get("/").await), "/login");

    let mut admin = admin_client(&app).await;
    assert_eq!(location(&admin.get("/").await), "/sistema/admin/dashboard");
}

// ========== Admin gate ==========

const ADMIN_PAGES: &[&str] = &[
    "/sistema/admin/dashboard",
    "/sistema/admin/usuarios",
    "/sistema/admin/usuarios/editar/1",
    "/sistema/admin/pvps",
    "/sistema/admin/pvps/cadastrar",
    "/sistema/admin/categorias",
    "/sistema/admin/categorias/cadastrar",
    "/sistema/admin/unidades",
    "/sistema/admin/unidades/nova",
];

#[tokio::test]
async fn anonymous_requests_are_sent_to_login() {
    let (app, pool) = setup().await;
    let mut client = TestClient::new(app);

    for uri in ADMIN_PAGES.iter().chain(&["/sistema/admin", "/sistema/admin/"]) {
        let response = client.get(uri).await;
        assert_eq!(location(&response), "/login", "GET {uri}");
    }

    let response = client
        .post(
            "/sistema/admin/pvps/cadastrar",
            &[("nome_pvp", "Global"), ("percentual", "10"), ("tipo_pvp", "global")],
        )
        .await;
    assert_eq!(location(&response), "/login");
    assert_eq!(count(&pool, "pvp").await, 0);

    let page = client.page("/login").await;
    assert!(
        flash_messages(&page, "error")
            .iter()
            .all(|m| m == "Você precisa fazer login para acessar esta página.")
    );
    assert!(flash_codes(&page).iter().all(|&c| c == 1001));
}

#[tokio::test]
async fn regular_session_is_denied() {
    let (app, pool) = setup().await;
    let mut client = TestClient::new(app);
    register(&mut client, "maria", "maria@example.com").await;
    client.login("maria", "segredo1").await;
    assert!(client.has_session());

    for uri in ADMIN_PAGES {
        let response = client.get(uri).await;
        assert_eq!(location(&response), "/", "GET {uri}");
    }

    let response = client
        .post(
            "/sistema/admin/unidades/nova",
            &[("nome_unidade", "Litro"), ("sigla_unidade", "L")],
        )
        .await;
    assert_eq!(location(&response), "/");
    assert_eq!(count(&pool, "unidade_medida").await, 0);
}

#[tokio::test]
async fn tampered_session_cookie_is_ignored() {
    let (app, _pool) = setup().await;
    let mut client = TestClient::new(app);
    client
        .cookies
        .insert("caixa_session".into(), "not-encrypted".into());
    let response = client.get("/sistema/admin/dashboard").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn admin_reaches_every_page() {
    let (app, _pool) = setup().await;
    let mut admin = admin_client(&app).await;

    for uri in ADMIN_PAGES {
        let response = admin.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }
    assert_eq!(
        location(&admin.get("/sistema/admin/").await),
        "/sistema/admin/dashboard"
    );

    let page = admin.page("/sistema/admin/dashboard").await;
    assert_eq!(page["template"], "dashboard.html");
    assert_eq!(page["user"]["role"], "admin");
    assert_eq!(page["context"]["cash_balance"], 0.0);
}

// ========== PVP ==========

#[tokio::test]
async fn second_active_global_pvp_is_rejected() {
    let (app, pool) = setup().await;
    let mut admin = admin_client(&app).await;

    let global = [("nome_pvp", "Global"), ("percentual", "10"), ("tipo_pvp", "global")];
    let response = admin.post("/sistema/admin/pvps/cadastrar", &global).await;
    assert_eq!(location(&response), "/sistema/admin/pvps");

    let response = admin
        .post(
            "/sistema/admin/pvps/cadastrar",
            &[("nome_pvp", "Global 2"), ("percentual", "12"), ("tipo_pvp", "global")],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/pvps/cadastrar");
    let page = admin.page("/sistema/admin/pvps/cadastrar").await;
    assert_eq!(
        flash_messages(&page, "error"),
        vec!["Já existe um PVP Global ativo. Inative o PVP existente antes de cadastrar um novo."]
    );
    assert_eq!(flash_codes(&page), vec![4002]);
    assert_eq!(count(&pool, "pvp").await, 1);

    // A non-global profile can't be switched to an active global either
    admin
        .post(
            "/sistema/admin/pvps/cadastrar",
            &[("nome_pvp", "Bebidas"), ("percentual", "5"), ("tipo_pvp", "categoria")],
        )
        .await;
    let other_id: i64 = sqlx::query_scalar("SELECT cod_pvp FROM pvp WHERE nome_pvp = 'Bebidas'")
        .fetch_one(&pool)
        .await
        .unwrap();
    let edit = format!("/sistema/admin/pvps/editar/{other_id}");
    let response = admin
        .post(
            &edit,
            &[
                ("nome_pvp", "Bebidas"),
                ("percentual", "5"),
                ("tipo_pvp", "global"),
                ("ativo", "on"),
            ],
        )
        .await;
    assert_eq!(location(&response), edit);
    let kind: String = sqlx::query_scalar("SELECT tipo_pvp FROM pvp WHERE cod_pvp = ?")
        .bind(other_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(kind, "categoria");
}

#[tokio::test]
async fn global_pvp_can_be_replaced_after_deactivation() {
    let (app, pool) = setup().await;
    let mut admin = admin_client(&app).await;
    admin
        .post(
            "/sistema/admin/pvps/cadastrar",
            &[("nome_pvp", "Global"), ("percentual", "10"), ("tipo_pvp", "global")],
        )
        .await;
    let id: i64 = sqlx::query_scalar("SELECT cod_pvp FROM pvp")
        .fetch_one(&pool)
        .await
        .unwrap();

    // Saving the active global itself is allowed
    let response = admin
        .post(
            &format!("/sistema/admin/pvps/editar/{id}"),
            &[
                ("nome_pvp", "Global"),
                ("percentual", "11"),
                ("tipo_pvp", "global"),
                ("ativo", "on"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/pvps");

    // Deactivate, then a new global is accepted
    admin
        .post(
            &format!("/sistema/admin/pvps/editar/{id}"),
            &[("nome_pvp", "Global"), ("percentual", "11"), ("tipo_pvp", "global")],
        )
        .await;
    let response = admin
        .post(
            "/sistema/admin/pvps/cadastrar",
            &[("nome_pvp", "Global 2026"), ("percentual", "9,5"), ("tipo_pvp", "global")],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/pvps");

    let page = admin.page("/sistema/admin/pvps").await;
    let pvps = page["context"]["pvps"].as_array().unwrap();
    assert_eq!(pvps.len(), 2);
    assert_eq!(pvps[1]["name"], "Global 2026");
    assert_eq!(pvps[1]["percentage"], 9.5);
}

#[tokio::test]
async fn malformed_percentage_is_reported() {
    let (app, pool) = setup().await;
    let mut admin = admin_client(&app).await;
    let response = admin
        .post(
            "/sistema/admin/pvps/cadastrar",
            &[("nome_pvp", "Promo"), ("percentual", "dez"), ("tipo_pvp", "promo")],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/pvps/cadastrar");
    let page = admin.page("/sistema/admin/pvps/cadastrar").await;
    assert_eq!(flash_messages(&page, "error"), vec!["Percentual inválido."]);
    assert_eq!(flash_codes(&page), vec![4004]);
    assert_eq!(count(&pool, "pvp").await, 0);
}

#[tokio::test]
async fn missing_pvp_edit_goes_back_to_list() {
    let (app, _pool) = setup().await;
    let mut admin = admin_client(&app).await;
    let response = admin.get("/sistema/admin/pvps/editar/404").await;
    assert_eq!(location(&response), "/sistema/admin/pvps");
    let page = admin.page("/sistema/admin/pvps").await;
    assert_eq!(flash_messages(&page, "error"), vec!["PVP não encontrado."]);
    assert_eq!(flash_codes(&page), vec![4001]);
}

#[tokio::test]
async fn non_numeric_ids_are_not_found() {
    let (app, pool) = setup().await;
    let mut admin = admin_client(&app).await;

    for uri in [
        "/sistema/admin/usuarios/editar/abc",
        "/sistema/admin/pvps/editar/1x",
        "/sistema/admin/categorias/editar/um",
        "/sistema/admin/unidades/editar/-",
    ] {
        let response = admin.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }
    let response = admin.post("/sistema/admin/pvps/excluir/abc", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The gate still runs first
    let mut anonymous = TestClient::new(app);
    let response = anonymous.get("/sistema/admin/pvps/editar/abc").await;
    assert_eq!(location(&response), "/login");
    assert_eq!(count(&pool, "pvp").await, 0);
}

// ========== Referenced deletes ==========

#[tokio::test]
async fn referenced_pvp_and_category_survive_delete() {
    let (app, pool) = setup().await;
    let mut admin = admin_client(&app).await;

    admin
        .post(
            "/sistema/admin/pvps/cadastrar",
            &[("nome_pvp", "Bebidas"), ("percentual", "5"), ("tipo_pvp", "categoria")],
        )
        .await;
    let pvp_id: i64 = sqlx::query_scalar("SELECT cod_pvp FROM pvp")
        .fetch_one(&pool)
        .await
        .unwrap();

    let create_page = admin.page("/sistema/admin/categorias/cadastrar").await;
    assert_eq!(create_page["context"]["pvps"][0]["id"], pvp_id);

    let pvp_field = pvp_id.to_string();
    let response = admin
        .post(
            "/sistema/admin/categorias/cadastrar",
            &[
                ("nome_categoria", "Bebidas"),
                ("descricao_categoria", "Sucos e refrigerantes"),
                ("pvp_categoria", &pvp_field),
            ],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/categorias");
    let category_id: i64 = sqlx::query_scalar("SELECT cod_categoria FROM categoria_produto")
        .fetch_one(&pool)
        .await
        .unwrap();

    let list = admin.page("/sistema/admin/categorias").await;
    assert_eq!(list["context"]["categories"][0]["pvp_name"], "Bebidas");

    // PVP referenced by the category
    let response = admin
        .post(&format!("/sistema/admin/pvps/excluir/{pvp_id}"), &[])
        .await;
    assert_eq!(location(&response), "/sistema/admin/pvps");
    let page = admin.page("/sistema/admin/pvps").await;
    assert_eq!(
        flash_messages(&page, "error"),
        vec!["Não foi possível excluir o PVP. Verifique se ele não está em uso por uma categoria."]
    );
    assert_eq!(flash_codes(&page), vec![4003]);
    assert_eq!(count(&pool, "pvp").await, 1);

    // Category referenced by a product
    sqlx::query("INSERT INTO produto (nome_produto, preco, cod_categoria) VALUES ('Suco', 7.5, ?)")
        .bind(category_id)
        .execute(&pool)
        .await
        .unwrap();
    let response = admin
        .post(&format!("/sistema/admin/categorias/excluir/{category_id}"), &[])
        .await;
    assert_eq!(location(&response), "/sistema/admin/categorias");
    assert_eq!(count(&pool, "categoria_produto").await, 1);
    let page = admin.page("/sistema/admin/categorias").await;
    assert_eq!(flash_messages(&page, "error").len(), 1);
    assert_eq!(flash_codes(&page), vec![5002]);

    // Unreferenced rows go away
    sqlx::query("DELETE FROM produto").execute(&pool).await.unwrap();
    admin
        .post(&format!("/sistema/admin/categorias/excluir/{category_id}"), &[])
        .await;
    admin
        .post(&format!("/sistema/admin/pvps/excluir/{pvp_id}"), &[])
        .await;
    assert_eq!(count(&pool, "categoria_produto").await, 0);
    assert_eq!(count(&pool, "pvp").await, 0);
}

#[tokio::test]
async fn category_edit_lists_all_pvps() {
    let (app, pool) = setup().await;
    let mut admin = admin_client(&app).await;

    for (name, kind) in [("Ativo", "categoria"), ("Inativo", "categoria")] {
        admin
            .post(
                "/sistema/admin/pvps/cadastrar",
                &[("nome_pvp", name), ("percentual", "1"), ("tipo_pvp", kind)],
            )
            .await;
    }
    sqlx::query("UPDATE pvp SET ativo = 0 WHERE nome_pvp = 'Inativo'")
        .execute(&pool)
        .await
        .unwrap();
    admin
        .post(
            "/sistema/admin/categorias/cadastrar",
            &[("nome_categoria", "Lanches"), ("pvp_categoria", "")],
        )
        .await;
    let category_id: i64 = sqlx::query_scalar("SELECT cod_categoria FROM categoria_produto")
        .fetch_one(&pool)
        .await
        .unwrap();

    let create_page = admin.page("/sistema/admin/categorias/cadastrar").await;
    assert_eq!(create_page["context"]["pvps"].as_array().unwrap().len(), 1);

    let edit_page = admin
        .page(&format!("/sistema/admin/categorias/editar/{category_id}"))
        .await;
    assert_eq!(edit_page["context"]["pvps"].as_array().unwrap().len(), 2);
    assert!(edit_page["context"]["category"]["pvp_id"].is_null());
}

// ========== Units ==========

#[tokio::test]
async fn unit_crud_and_referenced_delete() {
    let (app, pool) = setup().await;
    let mut admin = admin_client(&app).await;

    let response = admin
        .post(
            "/sistema/admin/unidades/nova",
            &[("nome_unidade", "Quilograma"), ("sigla_unidade", "kg")],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/unidades");
    let unit_id: i64 = sqlx::query_scalar("SELECT cod_unidade FROM unidade_medida")
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = admin
        .post(
            &format!("/sistema/admin/unidades/editar/{unit_id}"),
            &[("nome_unidade", "Quilo"), ("sigla_unidade", "kg")],
        )
        .await;
    assert_eq!(location(&response), "/sistema/admin/unidades");
    let page = admin
        .page(&format!("/sistema/admin/unidades/editar/{unit_id}"))
        .await;
    assert_eq!(page["context"]["unit"]["name"], "Quilo");
    assert_eq!(page["context"]["action"], "Editar");

    let category_id: i64 = sqlx::query_scalar(
        "INSERT INTO categoria_produto (nome_categoria) VALUES ('Hortifruti') RETURNING cod_categoria",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO produto (nome_produto, preco, cod_categoria, cod_unidade) VALUES ('Tomate', 8, ?, ?)")
        .bind(category_id)
        .bind(unit_id)
        .execute(&pool)
        .await
        .unwrap();

    admin
        .post(&format!("/sistema/admin/unidades/excluir/{unit_id}"), &[])
        .await;
    assert_eq!(count(&pool, "unidade_medida").await, 1);
    let page = admin.page("/sistema/admin/unidades").await;
    assert_eq!(flash_codes(&page), vec![6002]);

    // Delete is POST-only
    let response = admin
        .get(&format!("/sistema/admin/unidades/excluir/{unit_id}"))
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ========== Health ==========

#[tokio::test]
async fn health_reports_database() {
    let (app, _pool) = setup().await;
    let mut client = TestClient::new(app);
    let response = client.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}
