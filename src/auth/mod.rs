//! Client-side login gate.
//!
//! Compares a submitted username/password against the configured admin pair
//! and mints an opaque session token. This is a placeholder capability gate:
//! tokens are only checked for their prefix and nothing here protects data.
//! Callers go through the [`Authenticator`] trait so a backend-verified flow
//! can replace [`LocalAuthenticator`] without touching them.

pub mod credentials;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use credentials::Credentials;

/// Every issued token starts with this prefix.
pub const TOKEN_PREFIX: &str = "web-token-";

/// Role given to the admin user on login.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// The logged-in user as persisted in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: String,
}

/// Result of a successful [`Authenticator::authenticate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSuccess {
    pub token: String,
    pub user: User,
}

pub trait Authenticator {
    /// Check a submitted username/password pair and issue a session token.
    fn authenticate(&self, username: &str, password: &str) -> Result<AuthSuccess, AuthError>;

    /// Syntactic token check. Not a cryptographic verification.
    fn validate_token(&self, token: Option<&str>) -> bool {
        validate_token(token)
    }
}

/// [`Authenticator`] comparing against credentials baked into configuration.
#[derive(Debug, Clone)]
pub struct LocalAuthenticator {
    credentials: Credentials,
}

impl LocalAuthenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl Authenticator for LocalAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        let username = username.trim();
        let password = password.trim();

        if username != self.credentials.username || password != self.credentials.password {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthSuccess {
            token: issue_token(),
            user: User {
                username: self.credentials.username.clone(),
                role: ADMIN_ROLE.to_string(),
            },
        })
    }
}

/// True iff `token` is present and starts with [`TOKEN_PREFIX`].
pub fn validate_token(token: Option<&str>) -> bool {
    token.is_some_and(|t| t.starts_with(TOKEN_PREFIX))
}

/// Mint a new session token: the prefix plus a random identifier.
///
/// The identifier is a UUID v4 from the OS generator. If the OS generator is
/// unavailable, a time-and-counter identifier is used instead. Either way
/// the token only distinguishes sessions; it is not meant to resist attack.
pub fn issue_token() -> String {
    let mut bytes = [0u8; 16];
    let id = match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "OS random source unavailable, using weak session id");
            fallback_id()
        }
    };
    format!("{TOKEN_PREFIX}{id}")
}

fn fallback_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{nanos:x}-{:x}", count ^ u64::from(std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn authenticator() -> LocalAuthenticator {
        LocalAuthenticator::new(Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        })
    }

    #[test]
    fn issued_tokens_carry_a_uuid() {
        let token = issue_token();
        let id = token.strip_prefix(TOKEN_PREFIX).unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn tokens_are_distinct() {
        assert_ne!(issue_token(), issue_token());
    }

    #[test]
    fn fallback_ids_are_distinct() {
        assert_ne!(fallback_id(), fallback_id());
    }

    #[test]
    fn validate_token_needs_the_prefix() {
        let cases = [
            (None, false),
            (Some(""), false),
            (Some("web-token"), false),
            (Some("token-abc"), false),
            (Some("WEB-TOKEN-abc"), false),
            (Some("web-token-"), true),
            (Some("web-token-abc"), true),
        ];
        for (token, expected) in cases {
            assert_eq!(validate_token(token), expected, "{token:?}");
            assert_eq!(authenticator().validate_token(token), expected, "{token:?}");
        }
    }

    #[test]
    fn authenticate_trims_inputs() {
        let ok = authenticator().authenticate("  admin ", "admin123\n").unwrap();
        assert!(ok.token.starts_with(TOKEN_PREFIX));
        assert_eq!(ok.user.username, "admin");
        assert_eq!(ok.user.role, ADMIN_ROLE);
    }

    #[test]
    fn authenticate_is_case_sensitive() {
        assert_eq!(
            authenticator().authenticate("Admin", "admin123"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            authenticator().authenticate("admin", "ADMIN123"),
            Err(AuthError::InvalidCredentials)
        );
    }
}
