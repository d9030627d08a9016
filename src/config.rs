use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use thiserror::Error;
use validator::Validate;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";
const DEFAULT_ADMIN_EMAIL: &str = "admin@electronixz.com";
const DEV_DEFAULT_TOKEN_SECRET: &str =
    "development_only_admin_token_secret_at_least_32_chars";

/// Application configuration with validation.
///
/// Loaded from `config/default.toml`, an optional environment-specific file
/// and `APP__*` environment variables. Always constructed explicitly and
/// injected into the application state, never read through a global.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment ("development" or "production")
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Email of the seeded back-office administrator
    #[serde(default = "default_admin_email")]
    #[validate(email)]
    pub admin_email: String,

    /// Password for the seeded administrator (stored only as a digest)
    #[serde(default = "default_admin_password")]
    #[validate(length(min = 5))]
    pub admin_password: String,

    /// Secret used to derive admin bearer tokens from the admin id
    #[serde(default = "default_token_secret")]
    #[validate(length(min = 32))]
    pub admin_token_secret: String,

    /// Comma-separated list of allowed CORS origins; unset means permissive
    /// in development and an error in production
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_admin_email() -> String {
    DEFAULT_ADMIN_EMAIL.to_string()
}

fn default_admin_password() -> String {
    "change-me".to_string()
}

fn default_token_secret() -> String {
    DEV_DEFAULT_TOKEN_SECRET.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            admin_token_secret: default_token_secret(),
            cors_allowed_origins: None,
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read configuration: {0}")]
    Read(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Load configuration from files and environment.
///
/// Precedence, lowest to highest: `config/default.toml`, then
/// `config/<environment>.toml`, then `APP__*` environment variables
/// (e.g. `APP__PORT=9000`, `APP__ADMIN_TOKEN_SECRET=...`).
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    let environment = env::var("APP__ENVIRONMENT").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let cfg: AppConfig = Config::builder()
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, environment)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()?;

    cfg.validate()?;
    Ok(cfg)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level when set and non-empty.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("storefront_api={},tower_http=info", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let filter = EnvFilter::try_new(filter_directive).unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init();
    }
}
