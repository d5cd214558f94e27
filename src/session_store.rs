//! Logged-in identity.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use daybook_core::DaybookResult;

use crate::client::Backend;
use crate::event_cache::EventCache;

/// Holds the current username and clears the event cache on logout.
pub struct SessionStore<B> {
    backend: Arc<B>,
    events: Arc<EventCache<B>>,
    user: watch::Sender<Option<String>>,
}

impl<B: Backend> SessionStore<B> {
    pub fn new(backend: Arc<B>, events: Arc<EventCache<B>>) -> Self {
        let (user, _) = watch::channel(None);
        SessionStore {
            backend,
            events,
            user,
        }
    }

    pub fn user(&self) -> Option<String> {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.user.subscribe()
    }

    /// Set the identity after a login handled elsewhere. No network call.
    pub fn set_user(&self, username: impl Into<String>) {
        self.user.send_replace(Some(username.into()));
    }

    /// Forget the identity and empty the event cache. Local only; see
    /// [`sign_out`](Self::sign_out) to also end the server session.
    pub fn logout(&self) {
        self.user.send_replace(None);
        self.events.clear();
    }

    /// Ask the backend who is logged in.
    ///
    /// Returns the username on an active session. Anything else, including a
    /// failed request, logs out and returns `None`.
    pub async fn load_session(&self) -> Option<String> {
        self.check_session().await.ok().flatten()
    }

    /// Like [`load_session`](Self::load_session), but a transport or decode
    /// failure comes back as `Err` instead of `None`. The state change is the
    /// same either way.
    pub async fn check_session(&self) -> DaybookResult<Option<String>> {
        let status = match self.backend.session().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Session check failed");
                self.logout();
                return Err(e);
            }
        };

        match status.identity() {
            Some(username) => {
                debug!(%username, "Session active");
                self.set_user(username.clone());
                Ok(Some(username))
            }
            None => {
                debug!("No active session");
                self.logout();
                Ok(None)
            }
        }
    }

    /// Log in on the backend and take the returned username as identity.
    /// On failure the current identity is left alone.
    pub async fn login(&self, username: &str, password: &str) -> DaybookResult<String> {
        let resp = self
            .backend
            .login(username, password)
            .await
            .inspect_err(|e| warn!(username, error = %e, "Login failed"))?;

        info!(user = %resp.user, "Logged in");
        self.set_user(resp.user.clone());
        Ok(resp.user)
    }

    /// End the server session, then [`logout`](Self::logout) locally. Local
    /// state is cleared even when the request fails.
    pub async fn sign_out(&self) -> DaybookResult<()> {
        let result = self.backend.logout().await;
        if let Err(e) = &result {
            warn!(error = %e, "Logout request failed");
        }

        self.logout();
        result
    }
}
