//! Startup wiring: configuration, session context and REST client.

use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::auth::{Credentials, LocalAuthenticator};
use crate::config::BenchmarkinatorConfig;
use crate::session::{FileStorage, SessionContext};
use crate::ui::nav::Route;

pub type AppSession = SessionContext<FileStorage, LocalAuthenticator>;

/// Everything a command or the web server needs, built once at startup.
pub struct App {
    pub config: BenchmarkinatorConfig,
    pub session: AppSession,
}

impl App {
    pub fn start(config: BenchmarkinatorConfig) -> Result<Self> {
        let path = config
            .storage
            .resolved_path()
            .context("could not determine session store path")?;
        let storage = FileStorage::open(path);
        let authenticator = LocalAuthenticator::new(Credentials::resolve(&config.auth));
        let session = SessionContext::restore(storage, authenticator);
        Ok(Self { config, session })
    }

    /// A client carrying whatever API key the current session supplies.
    pub fn client(&self) -> ApiClient {
        ApiClient::from_config(&self.config.api)
            .with_api_key(self.session.api_key(&self.config.api.api_key))
    }

    /// Fail unless the current session may open `route`.
    pub fn require(&self, route: Route) -> Result<()> {
        if self.session.can_access(route) {
            Ok(())
        } else {
            anyhow::bail!("{route} requires login. Run `benchmarkinator login` first.")
        }
    }

    /// Fail unless logged in. Every mutation is gated this way.
    pub fn require_login(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            anyhow::bail!("this action requires login. Run `benchmarkinator login` first.")
        }
    }
}
