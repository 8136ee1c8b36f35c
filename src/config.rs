//! Client configuration helpers.
//!
//! The config is a small schema-versioned JSON file so the CLI stays
//! deterministic across machines; the bearer token deliberately lives in the
//! environment, never on disk.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current schema version for `config.json`.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Environment variable holding the bearer token for API calls.
pub const TOKEN_ENV: &str = "AGRIREG_API_TOKEN";

/// Persisted client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub schema_version: u32,
    /// Base URL of the registry API, e.g. `https://registry.example/api`.
    pub api_base_url: String,
}

/// Build the default config used when none exists yet.
pub fn default_config() -> ClientConfig {
    ClientConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        api_base_url: "http://localhost:8000/api".to_string(),
    }
}

/// Render a pretty JSON config stub for new installations.
pub fn config_stub() -> String {
    serde_json::to_string_pretty(&default_config()).expect("serialize config stub")
}

/// Default on-disk config location under the platform config directory.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow!("no platform config directory"))?;
    Ok(base.join("agrireg").join("config.json"))
}

/// Load and validate the config, falling back to defaults when the file does
/// not exist yet.
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    if !path.is_file() {
        return Ok(default_config());
    }
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ClientConfig = serde_json::from_slice(&bytes).context("parse config JSON")?;
    validate_config(&config)?;
    Ok(config)
}

/// Persist a config in a stable JSON format.
pub fn write_config(path: &Path, config: &ClientConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create config dir")?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize config")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Validate config schema and contents.
pub fn validate_config(config: &ClientConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    let url = config.api_base_url.trim();
    if url.is_empty() {
        return Err(anyhow!("api_base_url must be non-empty"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(anyhow!("api_base_url must be an http(s) URL (got {url:?})"));
    }
    Ok(())
}

/// Read the bearer token from the environment, if set.
pub fn resolve_token() -> Option<String> {
    std::env::var(TOKEN_ENV)
        .ok()
        .filter(|token| !token.trim().is_empty())
}
