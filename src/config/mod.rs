//! Configuration loading and management
//!
//! Configuration comes from YAML (every section optional) and is then
//! overlaid with environment variables:
//!
//! | Variable        | Overrides              |
//! |-----------------|------------------------|
//! | `LINKFEED_HOST` | `server.host`          |
//! | `LINKFEED_PORT` | `server.port`          |
//! | `APP_SECRET`    | `auth.jwt_secret`      |
//! | `DATABASE_URL`  | `storage.database_url` and selects `postgres` |

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

/// GraphQL endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Serve the playground UI on `GET /graphql`
    pub playground: bool,

    /// Maximum query depth; `None` disables the limit
    pub depth_limit: Option<usize>,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            playground: true,
            depth_limit: Some(16),
        }
    }
}

/// Caller identity configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret for bearer tokens; without it every caller is anonymous
    pub jwt_secret: Option<String>,
}

/// Which store backs the feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
}

/// Complete configuration of a feed server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub server: ServerConfig,
    pub graphql: GraphQLConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

impl FeedConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable source
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("LINKFEED_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("LINKFEED_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("LINKFEED_PORT is not a valid port: '{}'", port))?;
        }
        if let Some(secret) = lookup("APP_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.backend = StorageBackend::Postgres;
            self.storage.database_url = Some(url);
        }

        self.validate()?;
        Ok(self)
    }

    /// Address to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn validate(&self) -> Result<()> {
        if self.storage.backend == StorageBackend::Postgres && self.storage.database_url.is_none()
        {
            bail!("storage.database_url is required for the postgres backend");
        }
        if self.auth.jwt_secret.as_deref() == Some("") {
            bail!("auth.jwt_secret must not be empty");
        }
        Ok(())
    }
}
