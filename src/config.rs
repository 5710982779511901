//! Service configuration.
//!
//! Settings are resolved once at startup and passed explicitly into the
//! router state. Resolution order, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config`, or `debtcleaner.toml` in the working directory)
//! 3. `DEBTCLEANER_*` environment variables
//! 4. CLI flags (applied by the binary)
//!
//! ```toml
//! project_name = "DebtCleaner - Static Analysis"
//! debug = true
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [tools]
//! bandit = "/opt/venv/bin/bandit"
//! radon = "radon"
//! extensions = ["py"]
//! ```

use crate::errors::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "debtcleaner.toml";

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "DEBTCLEANER_";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name reported by `GET /`
    pub project_name: String,
    /// Debug mode; raises the default log level and is the default `debug`
    /// flag forwarded to the security engine
    pub debug: bool,
    /// Service version reported by `GET /`
    pub version: String,
    pub server: ServerConfig,
    pub tools: ToolsConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: "DebtCleaner - Static Analysis".to_string(),
            debug: true,
            version: "0.1.0".to_string(),
            server: ServerConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Engine binaries and the file-discovery rule shared by both adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Security engine executable, a bare name resolved through `PATH` or a path
    pub bandit: String,
    /// Metrics engine executable
    pub radon: String,
    /// File extensions (without the dot) picked up when scanning directories
    pub extensions: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            bandit: "bandit".to_string(),
            radon: "radon".to_string(),
            extensions: vec!["py".to_string()],
        }
    }
}

impl Settings {
    /// Load settings from disk and the process environment.
    ///
    /// An explicit `config_path` must exist. Without one, `debtcleaner.toml`
    /// in the working directory is used when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let base = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Read and parse a TOML settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let settings = toml::from_str(&contents).map_err(|e| {
            AnalysisError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from a TOML string; absent keys keep their defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| AnalysisError::config(format!("Failed to parse settings: {}", e)))
    }

    /// Apply `DEBTCLEANER_*` overrides read through `lookup`.
    ///
    /// `lookup` receives the full variable name, e.g. `DEBTCLEANER_PORT`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(format!("{ENV_PREFIX}{name}").as_str());

        if let Some(value) = var("PROJECT_NAME") {
            self.project_name = value;
        }
        if let Some(value) = var("DEBUG") {
            self.debug = parse_bool("DEBUG", &value)?;
        }
        if let Some(value) = var("VERSION") {
            self.version = value;
        }
        if let Some(value) = var("HOST") {
            self.server.host = value;
        }
        if let Some(value) = var("PORT") {
            self.server.port = value.trim().parse().map_err(|_| {
                AnalysisError::config(format!("{ENV_PREFIX}PORT is not a valid port: {value}"))
            })?;
        }
        if let Some(value) = var("BANDIT") {
            self.tools.bandit = value;
        }
        if let Some(value) = var("RADON") {
            self.tools.radon = value;
        }

        Ok(self)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AnalysisError::config(format!(
            "{ENV_PREFIX}{name} is not a boolean: {value}"
        ))),
    }
}
