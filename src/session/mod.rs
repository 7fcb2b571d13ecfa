//! Logged-in user and token.
//!
//! `Session` is a cheap handle: clones share the same state, and every change
//! made through one handle is visible to all others as soon as the call
//! returns. The session never talks to the network; callers authenticate
//! through the API client and hand the result to [`Session::login`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use log::{info, warn};
use crate::models::User;

mod store;
pub use store::SessionStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<watch::Sender<Option<Credentials>>>,
    store: Option<SessionStore>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty, in-memory session.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            state: Arc::new(tx),
            store: None,
        }
    }

    /// A session backed by `store`, starting from whatever it holds.
    /// An unreadable store is logged and treated as empty.
    pub fn restore(store: SessionStore) -> Self {
        let initial = match store.load() {
            Ok(Some(credentials)) => {
                info!("Restored session for {}", credentials.user.email);
                Some(credentials)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", store.path().display(), e);
                None
            }
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: Arc::new(tx),
            store: Some(store),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().as_ref().map(|c| c.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|c| c.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn login(&self, user: User, token: String) {
        let credentials = Credentials { user, token };
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&credentials) {
                warn!("Failed to persist session: {}", e);
            }
        }
        info!("User {} logged in", credentials.user.email);
        self.state.send_replace(Some(credentials));
    }

    pub fn logout(&self) {
        let previous = self.state.send_replace(None);
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!("Failed to remove persisted session: {}", e);
            }
        }
        if let Some(credentials) = previous {
            info!("User {} logged out", credentials.user.email);
        }
    }

    /// Change notifications for observers that need to react to login/logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<Credentials>> {
        self.state.subscribe()
    }
}
