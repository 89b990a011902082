//! Session context: the single holder of login state and the dark-mode
//! preference.
//!
//! Constructed once at startup with [`SessionContext::restore`], which
//! rehydrates from the persisted store, and then passed explicitly to
//! whatever needs it. No other component mutates the session.
//!
//! State machine:
//!
//! ```text
//! LoggedOut --login ok-------------------------------> LoggedIn
//! LoggedIn  --logout---------------------------------> LoggedOut
//! startup   --valid stored token + parseable user----> LoggedIn
//! startup   --anything else--------------------------> LoggedOut (store cleared)
//! ```
//!
//! There is no expiry: a token stays valid until logout or until the store
//! is cleared externally.

pub mod storage;

use serde::Serialize;
use thiserror::Error;

use crate::auth::{AuthError, Authenticator, User};
use crate::ui::nav::Route;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

/// Store key for the session token.
pub const TOKEN_KEY: &str = "auth_token";
/// Store key for the JSON-encoded [`User`].
pub const USER_KEY: &str = "auth_user";
/// Store key for the JSON-encoded dark-mode flag.
pub const DARK_MODE_KEY: &str = "dark_mode";
/// Store key for a user-entered API key.
pub const API_KEY_KEY: &str = "api_key";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub token: Option<String>,
}

pub struct SessionContext<S: Storage, A: Authenticator> {
    storage: S,
    authenticator: A,
    session: Session,
    dark_mode: bool,
    api_key: Option<String>,
}

impl<S: Storage, A: Authenticator> SessionContext<S, A> {
    /// Rehydrate session state and the dark-mode flag from `storage`.
    ///
    /// A stored token without the expected prefix, a missing user record or
    /// a user record that is not valid JSON clears both session keys and
    /// leaves the context logged out.
    pub fn restore(mut storage: S, authenticator: A) -> Self {
        let dark_mode = storage
            .get_item(DARK_MODE_KEY)
            .and_then(|raw| serde_json::from_str::<bool>(&raw).ok())
            .unwrap_or(false);
        let api_key = storage.get_item(API_KEY_KEY).filter(|k| !k.trim().is_empty());

        let token = storage.get_item(TOKEN_KEY);
        let session = if authenticator.validate_token(token.as_deref()) {
            match storage.get_item(USER_KEY).map(|raw| serde_json::from_str::<User>(&raw)) {
                Some(Ok(user)) => Session {
                    user: Some(user),
                    is_authenticated: true,
                    token,
                },
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "stored user record is malformed, clearing session");
                    clear_persisted(&mut storage);
                    Session::default()
                }
                None => {
                    tracing::warn!("stored token has no user record, clearing session");
                    clear_persisted(&mut storage);
                    Session::default()
                }
            }
        } else {
            if token.is_some() {
                tracing::warn!("stored token is malformed, clearing session");
            }
            clear_persisted(&mut storage);
            Session::default()
        };

        Self {
            storage,
            authenticator,
            session,
            dark_mode,
            api_key,
        }
    }

    /// Check credentials and, on success, become logged in and persist the
    /// token and user.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&User, SessionError> {
        let success = self.authenticator.authenticate(username, password)?;

        let user_json = serde_json::to_string(&success.user).map_err(StorageError::from)?;
        self.storage.set_item(TOKEN_KEY, &success.token)?;
        self.storage.set_item(USER_KEY, &user_json)?;

        tracing::info!(username = %success.user.username, "logged in");
        let user = self.session.user.insert(success.user);
        self.session.is_authenticated = true;
        self.session.token = Some(success.token);
        Ok(user)
    }

    /// Drop the session in memory and in storage. Memory is always cleared,
    /// even when the store cannot be written.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(user) = &self.session.user {
            tracing::info!(username = %user.username, "logged out");
        }
        self.session = Session::default();
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)
    }

    /// Flip the dark-mode preference and persist it. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, StorageError> {
        self.dark_mode = !self.dark_mode;
        let encoded = serde_json::to_string(&self.dark_mode)?;
        self.storage.set_item(DARK_MODE_KEY, &encoded)?;
        Ok(self.dark_mode)
    }

    /// Store an API key for every later request, or forget it with `None`
    /// or a blank key. Survives logout like the theme does.
    pub fn set_api_key(&mut self, key: Option<&str>) -> Result<(), StorageError> {
        match key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => {
                self.storage.set_item(API_KEY_KEY, key)?;
                self.api_key = Some(key.to_string());
            }
            None => {
                self.storage.remove_item(API_KEY_KEY)?;
                self.api_key = None;
            }
        }
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        if self.session.is_authenticated {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Document-level style class for the current theme.
    pub fn theme_class(&self) -> &'static str {
        if self.dark_mode { "dark" } else { "" }
    }

    pub fn can_access(&self, route: Route) -> bool {
        !route.requires_auth() || self.is_authenticated()
    }

    /// The `X-API-Key` value to send: the stored key, else `configured`.
    pub fn api_key<'a>(&'a self, configured: &'a str) -> Option<&'a str> {
        self.api_key
            .as_deref()
            .or((!configured.is_empty()).then_some(configured))
    }

    pub fn has_stored_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn clear_persisted<S: Storage>(storage: &mut S) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(e) = storage.remove_item(key) {
            tracing::error!(key, error = %e, "failed to clear session key");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, LocalAuthenticator, TOKEN_PREFIX};

    fn context(storage: MemoryStorage) -> SessionContext<MemoryStorage, LocalAuthenticator> {
        SessionContext::restore(storage, LocalAuthenticator::new(Credentials::default()))
    }

    #[test]
    fn starts_logged_out_on_empty_store() {
        let ctx = context(MemoryStorage::new());
        assert_eq!(ctx.state(), SessionState::LoggedOut);
        assert!(!ctx.dark_mode());
        assert_eq!(ctx.theme_class(), "");
    }

    #[test]
    fn failed_login_leaves_state_untouched() {
        let store = MemoryStorage::new();
        let mut ctx = context(store.clone());
        let err = ctx.login("admin", "nope").unwrap_err();
        assert!(matches!(err, SessionError::Auth(AuthError::InvalidCredentials)));
        assert!(!ctx.is_authenticated());
        assert!(store.is_empty());
    }

    #[test]
    fn login_persists_token_and_user() {
        let store = MemoryStorage::new();
        let mut ctx = context(store.clone());
        let user = ctx.login("admin", "admin123").unwrap().clone();
        assert_eq!(user.role, "admin");
        assert!(ctx.token().unwrap().starts_with(TOKEN_PREFIX));
        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), ctx.token());
        let stored: User = serde_json::from_str(&store.get_item(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, user);
    }

    #[test]
    fn token_without_user_is_cleared() {
        let mut store = MemoryStorage::new();
        store.set_item(TOKEN_KEY, "web-token-abc").unwrap();
        let ctx = context(store.clone());
        assert!(!ctx.is_authenticated());
        assert_eq!(store.get_item(TOKEN_KEY), None);
    }

    #[test]
    fn configured_api_key_is_the_fallback() {
        let mut ctx = context(MemoryStorage::new());
        assert_eq!(ctx.api_key("k"), Some("k"));
        assert_eq!(ctx.api_key(""), None);

        ctx.set_api_key(Some(" entered ")).unwrap();
        assert_eq!(ctx.api_key("k"), Some("entered"));
        assert_eq!(ctx.api_key(""), Some("entered"));

        ctx.set_api_key(Some("  ")).unwrap();
        assert!(!ctx.has_stored_api_key());
        assert_eq!(ctx.api_key("k"), Some("k"));
    }

    #[test]
    fn stored_api_key_survives_logout() {
        let store = MemoryStorage::new();
        let mut ctx = context(store.clone());
        ctx.login("admin", "admin123").unwrap();
        ctx.set_api_key(Some("entered")).unwrap();
        ctx.logout().unwrap();
        assert_eq!(store.get_item(API_KEY_KEY).as_deref(), Some("entered"));
        assert_eq!(context(store).api_key(""), Some("entered"));
    }

    #[test]
    fn results_route_is_reachable_logged_out() {
        let ctx = context(MemoryStorage::new());
        assert!(ctx.can_access(Route::Results));
        assert!(!ctx.can_access(Route::Hardware));
    }
}
