// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context: one intranet token plus the client that uses it.
//!
//! A `Session` is created once per connection attempt and handed to whoever
//! needs to search. Reconnecting builds a new `Session`; the old token is
//! dropped with it.

use crate::error::AppError;
use crate::models::{AccessToken, Credentials, ProjectLookup, UserProfile};
use crate::services::IntraClient;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Authenticated session against the intranet API.
pub struct Session {
    client: IntraClient,
    token: AccessToken,
    /// Generation of the most recently started search.
    latest_search: AtomicU64,
}

/// Profile plus whatever project data could be fetched for it.
#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub profile: UserProfile,
    pub projects: ProjectLookup,
}

/// How a search ended.
#[derive(Debug)]
pub enum SearchOutcome {
    Found(ProfileResult),
    /// A newer search started before this one finished; its result was dropped.
    Superseded,
    /// The caller's cancellation signal fired first.
    Cancelled,
}

impl Session {
    /// Acquire a token and open a session.
    pub async fn connect(client: IntraClient, credentials: &Credentials) -> Result<Self, AppError> {
        let token = client.acquire_token(credentials).await?;
        Ok(Self::with_token(client, token))
    }

    /// Wrap an already-acquired token.
    pub fn with_token(client: IntraClient, token: AccessToken) -> Self {
        Self {
            client,
            token,
            latest_search: AtomicU64::new(0),
        }
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub async fn lookup_user(&self, login: &str) -> Result<UserProfile, AppError> {
        self.client.lookup_user(&self.token, login).await
    }

    pub async fn lookup_projects(&self, login: &str) -> ProjectLookup {
        self.client.lookup_projects(&self.token, login).await
    }

    /// Look up a user, then their projects.
    ///
    /// A failed user lookup short-circuits: no projects request is made.
    pub async fn fetch_profile(&self, login: &str) -> Result<ProfileResult, AppError> {
        let profile = self.lookup_user(login).await?;
        let projects = self.lookup_projects(login).await;

        tracing::info!(
            login,
            projects_available = projects.is_available(),
            "Profile lookup completed"
        );
        Ok(ProfileResult { profile, projects })
    }

    /// [`Session::fetch_profile`] for a single interactive searcher.
    ///
    /// If another search starts on this session while this one is in flight,
    /// this one reports [`SearchOutcome::Superseded`] instead of its result.
    pub async fn search(&self, login: &str) -> Result<SearchOutcome, AppError> {
        let generation = self.latest_search.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.fetch_profile(login).await;
        if self.is_stale(generation) {
            tracing::debug!(login, "Search superseded by a newer one");
            return Ok(SearchOutcome::Superseded);
        }

        result.map(SearchOutcome::Found)
    }

    /// [`Session::search`], abandoned as soon as `cancel` resolves.
    pub async fn search_cancellable<F>(
        &self,
        login: &str,
        cancel: F,
    ) -> Result<SearchOutcome, AppError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::debug!(login, "Search cancelled by caller");
                Ok(SearchOutcome::Cancelled)
            }
            outcome = self.search(login) => outcome,
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.latest_search.load(Ordering::SeqCst) != generation
    }
}
