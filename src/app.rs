//! Application context.
//!
//! Built once at startup and passed to whatever needs the stores.

use std::sync::Arc;

use tracing::info;

use daybook_core::{ClientConfig, DaybookResult};

use crate::client::{Backend, Client};
use crate::event_cache::EventCache;
use crate::session_store::SessionStore;

/// The backend client plus both stores, sharing one connection.
pub struct Daybook<B = Client> {
    backend: Arc<B>,
    events: Arc<EventCache<B>>,
    session: Arc<SessionStore<B>>,
}

impl Daybook<Client> {
    /// Connect using ~/.config/daybook/config.toml (and `DAYBOOK_*` overrides).
    pub fn load() -> DaybookResult<Self> {
        Self::connect(ClientConfig::load()?)
    }

    pub fn connect(config: ClientConfig) -> DaybookResult<Self> {
        info!(base_url = %config.base_url, "Connecting to daybook backend");
        let client = Client::new(config)?;
        Ok(Self::with_backend(Arc::new(client)))
    }
}

impl<B: Backend> Daybook<B> {
    pub fn with_backend(backend: Arc<B>) -> Self {
        let events = Arc::new(EventCache::new(Arc::clone(&backend)));
        let session = Arc::new(SessionStore::new(Arc::clone(&backend), Arc::clone(&events)));

        Daybook {
            backend,
            events,
            session,
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn events(&self) -> &Arc<EventCache<B>> {
        &self.events
    }

    pub fn session(&self) -> &Arc<SessionStore<B>> {
        &self.session
    }
}

impl<B> Clone for Daybook<B> {
    fn clone(&self) -> Self {
        Daybook {
            backend: Arc::clone(&self.backend),
            events: Arc::clone(&self.events),
            session: Arc::clone(&self.session),
        }
    }
}
