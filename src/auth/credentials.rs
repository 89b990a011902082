use crate::config::schema::AuthConfig;

/// The admin username used when none is configured.
pub const DEFAULT_USERNAME: &str = "admin";
/// The admin password used when none is configured.
pub const DEFAULT_PASSWORD: &str = "admin123";

/// The expected admin `(username, password)` pair.
///
/// Resolved once at startup from [`AuthConfig`]; empty values fall back to
/// the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn resolve(config: &AuthConfig) -> Self {
        Self {
            username: non_empty_or(&config.admin_username, DEFAULT_USERNAME),
            password: non_empty_or(&config.admin_password, DEFAULT_PASSWORD),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::resolve(&AuthConfig::default())
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_configured_pair() {
        let creds = Credentials::resolve(&AuthConfig {
            admin_username: "root".to_string(),
            admin_password: "hunter2".to_string(),
        });
        assert_eq!(creds.username, "root");
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let creds = Credentials::resolve(&AuthConfig {
            admin_username: String::new(),
            admin_password: String::new(),
        });
        assert_eq!(creds, Credentials::default());
        assert_eq!(creds.username, DEFAULT_USERNAME);
        assert_eq!(creds.password, DEFAULT_PASSWORD);
    }
}
