//! Server configuration loaded from `config.toml`.

use agrareg_auth::AuthSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of HTTP workers; 0 means one per CPU core.
    #[serde(default)]
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_path")]
    pub rocksdb_path: String,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: i64,
    /// Admin account created on first startup when no users exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_path() -> String {
    "./data/rocksdb".to_string()
}

fn default_jwt_secret() -> String {
    String::new()
}

fn default_jwt_expiry_hours() -> i64 {
    24
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/server.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            rocksdb_path: default_data_path(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiry_hours: default_jwt_expiry_hours(),
            bootstrap_admin: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file(),
            log_to_console: true,
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            auth: AuthConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AuthConfig {
    /// The settings slice shared with the login handler and the middleware.
    pub fn to_settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt_secret.clone(),
            jwt_expiry_hours: self.jwt_expiry_hours,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist. A file that exists but fails to parse is an
    /// error, not a silent fallback.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
            toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?
        } else {
            ServerConfig::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Environment variable overrides, taking precedence over the file:
    /// - AGRAREG_SERVER_HOST, AGRAREG_SERVER_PORT
    /// - AGRAREG_DATA_DIR
    /// - AGRAREG_JWT_SECRET
    /// - AGRAREG_LOG_LEVEL
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("AGRAREG_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("AGRAREG_SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid AGRAREG_SERVER_PORT value: {}", port))?;
        }
        if let Ok(path) = env::var("AGRAREG_DATA_DIR") {
            self.storage.rocksdb_path = path;
        }
        if let Ok(secret) = env::var("AGRAREG_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(level) = env::var("AGRAREG_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration settings.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!(
                "auth.jwt_secret must be set (config.toml or AGRAREG_JWT_SECRET)"
            ));
        }
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("auth.jwt_expiry_hours must be positive"));
        }

        Ok(())
    }
}
