// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Intra-Companion: look up 42 intranet profiles by login
//!
//! This crate provides the backend API that authenticates against the 42
//! intranet with client credentials and serves profile, skill and project
//! data for a searched login.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{IntraClient, Session};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub client: IntraClient,
    /// Current intranet session; `None` until a token exchange succeeds.
    pub session: RwLock<Option<Arc<Session>>>,
}

impl AppState {
    pub fn new(config: Config, client: IntraClient) -> Self {
        Self {
            config,
            client,
            session: RwLock::new(None),
        }
    }

    /// Snapshot of the live session, if any.
    pub async fn current_session(&self) -> Option<Arc<Session>> {
        self.session.read().await.clone()
    }

    /// Acquire a fresh token and replace the current session.
    ///
    /// On failure the session this attempt started from is dropped. A session
    /// installed by someone else in the meantime is left in place.
    pub async fn connect(&self) -> error::Result<Arc<Session>> {
        let previous = self.current_session().await;

        match Session::connect(self.client.clone(), &self.config.credentials()).await {
            Ok(session) => {
                let session = Arc::new(session);
                *self.session.write().await = Some(session.clone());
                Ok(session)
            }
            Err(e) => {
                let mut slot = self.session.write().await;
                let unchanged = match (slot.as_ref(), previous.as_ref()) {
                    (Some(current), Some(previous)) => Arc::ptr_eq(current, previous),
                    (current, previous) => current.is_none() && previous.is_none(),
                };
                if unchanged {
                    *slot = None;
                }
                Err(e)
            }
        }
    }
}
