use super::ServerError;

/// Seed account created at startup when no admin exists
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | DATABASE_PATH | $WORK_DIR/caixa.db | SQLite 文件 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SESSION_SECRET | dev 占位值 | Cookie 加密密钥，非 development 必填 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 设置后启用按天滚动的日志文件 |
/// | BOOTSTRAP_ADMIN_USERNAME / _PASSWORD / _EMAIL | - | 无管理员时创建的初始账号 |
/// | SECURE_COOKIES | production 下为 true | Cookie `Secure` 标志 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/caixa HTTP_PORT=8080 cargo run -p admin-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub session_secret: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub secure_cookies: bool,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let work_dir = var("WORK_DIR").unwrap_or_else(|| "./data".into());
        let database_path =
            var("DATABASE_PATH").unwrap_or_else(|| format!("{work_dir}/caixa.db"));

        let session_secret = match var("SESSION_SECRET") {
            Some(secret) => secret,
            None if environment == "development" => "dev-SESSION_SECRET-not-for-production".into(),
            None => {
                return Err(ServerError::Config(format!(
                    "SESSION_SECRET must be set in {environment} environment"
                )));
            }
        };

        let bootstrap_admin = match (
            var("BOOTSTRAP_ADMIN_USERNAME"),
            var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin {
                email: var("BOOTSTRAP_ADMIN_EMAIL")
                    .unwrap_or_else(|| format!("{username}@localhost")),
                username,
                password,
            }),
            (None, None) => None,
            _ => {
                return Err(ServerError::Config(
                    "BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                        .into(),
                ));
            }
        };

        let secure_cookies = var("SECURE_COOKIES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(environment == "production");

        Ok(Self {
            http_port: var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
            work_dir,
            database_path,
            environment,
            session_secret,
            bootstrap_admin,
            secure_cookies,
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
