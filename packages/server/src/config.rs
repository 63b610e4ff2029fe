use config::{Config, ConfigError, Environment, File};
use podium_common::identity::{AdminPolicy, DEFAULT_ADMIN_NAME};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued tokens. Default: 7 days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

fn default_token_ttl_days() -> i64 {
    7
}

/// Contest round settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ContestConfig {
    /// Login name that is created with the admin flag. Case-sensitive. Default: "Admin".
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
    /// TOML file with `[[entries]]` to seed on startup.
    #[serde(default)]
    pub entries_file: Option<String>,
}

fn default_admin_name() -> String {
    DEFAULT_ADMIN_NAME.into()
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            admin_name: default_admin_name(),
            entries_file: None,
        }
    }
}

impl ContestConfig {
    pub fn admin_policy(&self) -> AdminPolicy {
        AdminPolicy::new(self.admin_name.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub contest: ContestConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PODIUM__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("PODIUM")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
