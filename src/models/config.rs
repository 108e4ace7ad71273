//! Layered application configuration.
//!
//! Values are read from `config/default.yaml`, then `config/{APP_ENV}.yaml`
//! when present, then environment variables prefixed with `APP__`
//! (for example `APP__SERVER__PORT=9000`).

use serde::{Deserialize, Serialize};

use crate::navigation::RouteTokens;
use crate::navigation::meta::SiteMeta;

/// Configuration options specific to the portfolio service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub owner: OwnerConfig,
    pub site: SiteMeta,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub navigation: RouteTokens,
    #[serde(default = "default_templates")]
    pub templates: String,
    /// Maximum number of works shown in the home page preview.
    #[serde(default = "default_preview_quota")]
    pub preview_quota: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Cookie signing key, at least 64 bytes.
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Where uploaded media lives on disk and where it is served from.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub dir: String,
    #[serde(default = "default_media_url")]
    pub url: String,
}

/// Credentials of the single site owner.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerConfig {
    pub email: String,
    /// Argon2id PHC string, see the `hash-password` binary.
    pub password_hash: String,
}

/// Contact details shown in the contact section of the home page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub email: String,
    pub phone: String,
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_media_url() -> String {
    "/media".to_string()
}

fn default_templates() -> String {
    "templates/**/*".to_string()
}

const fn default_preview_quota() -> usize {
    6
}

impl ServerConfig {
    /// Load configuration from files and environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
