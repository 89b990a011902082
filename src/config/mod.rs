//! Configuration system for benchmarkinator.
//!
//! Provides a layered configuration hierarchy:
//!
//! 1. **Built-in defaults**: hardcoded in [`schema::BenchmarkinatorConfig::default()`]
//! 2. **User global config**: `~/.benchmarkinator/config.toml`
//! 3. **Project local config**: `.benchmarkinator.toml` in the current working directory
//! 4. **Environment variables**: `BENCHMARKINATOR_*` overrides (highest precedence)
//!
//! The configuration is resolved once at startup and passed down
//! explicitly; there is no runtime reconfiguration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use benchmarkinator::config;
//!
//! let cfg = config::load();
//! let client = ApiClient::from_config(&cfg.api);
//! ```

pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::BenchmarkinatorConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> BenchmarkinatorConfig {
    let mut config = BenchmarkinatorConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. Malformed files are logged and skipped.
fn load_toml_file(path: Option<PathBuf>) -> Option<BenchmarkinatorConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.benchmarkinator/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".benchmarkinator").join("config.toml"))
}

/// Path to the project local config: `.benchmarkinator.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".benchmarkinator.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `BENCHMARKINATOR_API_URL`: REST API base URL
/// - `BENCHMARKINATOR_API_KEY`: value for the `X-API-Key` header
/// - `BENCHMARKINATOR_API_TIMEOUT_MS`: per-request timeout
/// - `BENCHMARKINATOR_WEBADMIN`: expected admin username
/// - `BENCHMARKINATOR_WEBPASSWORD`: expected admin password
/// - `BENCHMARKINATOR_STORAGE`: session store path
/// - `BENCHMARKINATOR_WEB_ADDR`: dashboard listen address
/// - `BENCHMARKINATOR_LOG`: log level
pub fn apply_env_overrides(config: &mut BenchmarkinatorConfig) {
    if let Some(val) = non_empty_env("BENCHMARKINATOR_API_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("BENCHMARKINATOR_API_KEY") {
        config.api.api_key = val;
    }
    if let Some(val) = non_empty_env("BENCHMARKINATOR_API_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Some(val) = non_empty_env("BENCHMARKINATOR_WEBADMIN") {
        config.auth.admin_username = val;
    }
    if let Some(val) = non_empty_env("BENCHMARKINATOR_WEBPASSWORD") {
        config.auth.admin_password = val;
    }
    if let Some(val) = non_empty_env("BENCHMARKINATOR_STORAGE") {
        config.storage.path = val;
    }
    if let Some(val) = non_empty_env("BENCHMARKINATOR_WEB_ADDR") {
        config.web.addr = val;
    }
    if let Some(val) = non_empty_env("BENCHMARKINATOR_LOG") {
        config.logging.level = val;
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.benchmarkinator/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.benchmarkinator/ directory")?;
    }

    fs::write(&path, BenchmarkinatorConfig::default_toml())
        .context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `api.base_url`. When no file exists yet, the
/// defaults are written first.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&BenchmarkinatorConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The new value takes the type of the existing one; unknown leaves are
/// stored as strings.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(*leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
