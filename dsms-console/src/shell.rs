//! Application shell
//!
//! Owns the two pieces of cross-page state: the HTTP client and the
//! session store. Constructed once at startup and passed by reference
//! to whichever page is active; pages themselves keep only local state.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::RwLock;

use dsms_client::{ClientConfig, ClientError, DsmsClient, ReqwestTransport, Transport};

use crate::config::ConsoleConfig;
use crate::guard::{GuardState, Require, evaluate};
use crate::privileges::PrivilegeFlag;
use crate::session::{Session, SessionError, SessionStore};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// The console's top-level state holder
pub struct ConsoleShell<T: Transport = ReqwestTransport> {
    client: DsmsClient<T>,
    session: RwLock<SessionStore>,
    bootstrapped: AtomicBool,
}

impl ConsoleShell<ReqwestTransport> {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ShellError> {
        let client_config =
            ClientConfig::new(&config.api_base_url).with_timeout(config.request_timeout);
        let client = DsmsClient::new(&client_config)?;
        Ok(Self::with_client(
            client,
            SessionStore::new(&config.session_file),
        ))
    }
}

impl<T: Transport> ConsoleShell<T> {
    /// Assemble a shell from parts (tests inject a scripted transport)
    pub fn with_client(client: DsmsClient<T>, session: SessionStore) -> Self {
        Self {
            client,
            session: RwLock::new(session),
            bootstrapped: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &DsmsClient<T> {
        &self.client
    }

    /// Hydrate the persisted session, if any, and install its tokens.
    /// Until this has run once, every guard evaluates to `Loading`.
    pub async fn bootstrap(&self) -> Result<Option<Session>, ShellError> {
        let path = self.session.read().await.file_path().to_path_buf();
        let store = SessionStore::load(path)?;
        let current = store.current().cloned();
        if let Some(session) = &current {
            self.client.set_tokens(session.tokens.clone()).await;
        }
        *self.session.write().await = store;
        self.bootstrapped.store(true, Ordering::SeqCst);
        Ok(current)
    }

    /// Authenticate, resolve the current user and persist the session
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ShellError> {
        let tokens = self.client.login(username, password).await?;
        let user = self.client.me().await?;
        let session = Session {
            username: user.username.clone(),
            expires_at: Session::parse_jwt_exp(&tokens.access_token),
            tokens,
            user,
            logged_in_at: shared::util::now_millis(),
        };
        self.session.write().await.set_current(session.clone())?;
        self.bootstrapped.store(true, Ordering::SeqCst);
        tracing::info!(username = %session.username, "Logged in");
        Ok(session)
    }

    /// Clear tokens and wipe the persisted session
    pub async fn logout(&self) -> Result<(), ShellError> {
        self.client.clear_tokens().await;
        self.session.write().await.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.current().cloned()
    }

    pub async fn has_privilege(&self, flag: PrivilegeFlag) -> bool {
        let store = self.session.read().await;
        store
            .current()
            .map(|session| crate::privileges::has_privilege(session.privileges(), flag))
            .unwrap_or(false)
    }

    /// Guard decision for a navigation attempt; evaluated afresh every call
    pub async fn guard(&self, require: Require) -> GuardState {
        let bootstrapping = !self.bootstrapped.load(Ordering::SeqCst);
        let store = self.session.read().await;
        evaluate(bootstrapping, store.current(), require)
    }
}
