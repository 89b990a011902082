/// Configuration schema and defaults for benchmarkinator.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[api]`, `[auth]`, `[storage]`, `[web]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level benchmarkinator configuration.
///
/// Maps directly to `~/.benchmarkinator/config.toml` and the project-local
/// `.benchmarkinator.toml`. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkinatorConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// REST API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    pub base_url: String,
    /// Value sent in the `X-API-Key` header. Empty means no header.
    pub api_key: String,
    /// Per-request timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:12345/api".to_string(),
            api_key: String::new(),
            timeout_ms: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [auth]
// ---------------------------------------------------------------------------

/// Expected admin credentials for the local login gate.
///
/// This is a placeholder capability gate, not a security boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [storage]
// ---------------------------------------------------------------------------

/// Location of the persisted session/preference store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON store. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "~/.benchmarkinator/storage.json".to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolve the configured path, expanding a leading `~`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        expand_home(&self.path)
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded web dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `benchmarkinator web`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else if path == "~" {
        dirs::home_dir()
    } else {
        Some(PathBuf::from(path))
    }
}

impl BenchmarkinatorConfig {
    /// Annotated default config written by `benchmarkinator config init`.
    pub fn default_toml() -> String {
        r#"# benchmarkinator configuration
#
# Layers (later wins): built-in defaults, ~/.benchmarkinator/config.toml,
# ./.benchmarkinator.toml, BENCHMARKINATOR_* environment variables.

[api]
# Base URL of the REST API, including the /api prefix.
base_url = "http://localhost:12345/api"
# Sent as the X-API-Key header on every request.
api_key = ""
# Per-request timeout (milliseconds, 0 = none).
timeout_ms = 10000

[auth]
# Expected admin credentials for `benchmarkinator login`.
# NOTE: a local placeholder gate, not a security boundary.
admin_username = "admin"
admin_password = "admin123"

[storage]
path = "~/.benchmarkinator/storage.json"

[web]
addr = "127.0.0.1:9747"
open_browser = true

[logging]
# error | warn | info | debug | trace
level = "info"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = BenchmarkinatorConfig::default();
        assert_eq!(cfg.api.base_url, "http://localhost:12345/api");
        assert!(cfg.api.api_key.is_empty());
        assert_eq!(cfg.auth.admin_username, "admin");
        assert_eq!(cfg.auth.admin_password, "admin123");
        assert_eq!(cfg.web.addr, "127.0.0.1:9747");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn default_toml_parses_to_defaults() {
        let cfg: BenchmarkinatorConfig =
            toml::from_str(&BenchmarkinatorConfig::default_toml()).unwrap();
        let defaults = BenchmarkinatorConfig::default();
        assert_eq!(cfg.api.base_url, defaults.api.base_url);
        assert_eq!(cfg.api.timeout_ms, defaults.api.timeout_ms);
        assert_eq!(cfg.storage.path, defaults.storage.path);
        assert_eq!(cfg.web.open_browser, defaults.web.open_browser);
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let cfg: BenchmarkinatorConfig = toml::from_str(
            r#"
[api]
api_key = "secret"
"#,
        )
        .unwrap();
        assert_eq!(cfg.api.api_key, "secret");
        assert_eq!(cfg.api.base_url, "http://localhost:12345/api");
        assert_eq!(cfg.auth.admin_username, "admin");
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home("/tmp/store.json"),
            Some(PathBuf::from("/tmp/store.json"))
        );
    }
}
