use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
    #[serde(default = "default_true")]
    pub seed_hotel_agent: bool,
}

fn default_store_path() -> String {
    "~/.concierge/agents.json".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            seed_hotel_agent: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// "permissive" for local development, "strict" to allow one origin.
    #[serde(default = "default_cors_mode")]
    pub mode: String,
    /// Browser origin allowed when mode is "strict".
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

fn default_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            mode: default_cors_mode(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".concierge")
}

impl ConciergeConfig {
    pub fn load(custom_path: &Option<PathBuf>) -> Result<Self> {
        let path = custom_path
            .clone()
            .unwrap_or_else(|| config_dir().join("config.toml"));

        let content = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read config at {}. Run `concierge init` first.",
                path.display()
            )
        })?;

        // Expand environment variables before parsing
        let expanded = expand_env_vars(&content);

        let config: Self = toml::from_str(&expanded)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        Ok(config)
    }
}

/// Allowlist of environment variable names that may be expanded in config
/// files. Keeps a writable config file from becoming a way to read
/// arbitrary environment variables.
const ALLOWED_ENV_VARS: &[&str] = &["FRONTEND_URL", "PORT", "HOME", "USER"];

fn expand_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut pos = 0;
    while pos < result.len() {
        if let Some(start) = result[pos..].find("${") {
            let abs_start = pos + start;
            if let Some(end) = result[abs_start..].find('}') {
                let var_name = result[abs_start + 2..abs_start + end].to_string();

                // Only expand variables in the allowlist
                let value = if ALLOWED_ENV_VARS.contains(&var_name.as_str()) {
                    std::env::var(&var_name).unwrap_or_default()
                } else {
                    warn!(
                        "Skipping expansion of unrecognized env var '{}' in config (not in allowlist)",
                        var_name
                    );
                    // Leave the ${VAR} unexpanded so it's obvious
                    pos = abs_start + end + 1;
                    continue;
                };

                let value_len = value.len();
                result = format!(
                    "{}{}{}",
                    &result[..abs_start],
                    value,
                    &result[abs_start + end + 1..]
                );
                pos = abs_start + value_len; // Skip past the expanded value
            } else {
                break;
            }
        } else {
            break;
        }
    }
    result
}
