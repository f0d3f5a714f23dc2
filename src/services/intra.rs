// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! 42 intranet API client.
//!
//! Handles:
//! - Client-credentials token exchange
//! - User lookup by login
//! - Best-effort project lookup
//!
//! Nothing here retries; callers decide what to do with a failure.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{AccessToken, Credentials, ProjectLookup, ProjectRecord, UserProfile};
use crate::services::login;
use anyhow::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::borrow::Cow;
use std::time::Duration;

/// Intranet API client.
#[derive(Clone)]
pub struct IntraClient {
    http: reqwest::Client,
    base_url: String,
}

impl IntraClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building intranet HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(config.api_url.clone(), config.http_timeout)
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth/token", self.base_url)
    }

    pub fn users_endpoint(&self) -> String {
        format!("{}/v2/users", self.base_url)
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// POST {base}/oauth/token
    /// grant_type=client_credentials&client_id=..&client_secret=..
    pub async fn acquire_token(&self, credentials: &Credentials) -> Result<AccessToken, AppError> {
        if !credentials.is_complete() {
            return Err(AppError::Config(
                "intranet client id and secret must both be set".to_string(),
            ));
        }

        let response = self
            .http
            .post(self.token_endpoint())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id()),
                ("client_secret", credentials.client_secret()),
            ])
            .send()
            .await
            .map_err(AppError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Intranet token exchange failed");
            return Err(AppError::Auth(format!(
                "token exchange failed with status {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("failed to parse token response: {}", e)))?;

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Auth("token response has no access_token".to_string()))?;

        tracing::info!(
            expires_in = token.expires_in,
            scope = token.scope.as_deref().unwrap_or(""),
            "Intranet access token acquired"
        );

        Ok(AccessToken::new(access_token, chrono::Utc::now()))
    }

    /// Fetch a user's profile.
    ///
    /// `login` is percent-encoded here; pass it raw.
    pub async fn lookup_user(
        &self,
        token: &AccessToken,
        login: &str,
    ) -> Result<UserProfile, AppError> {
        let url = format!("{}/{}", self.users_endpoint(), path_segment(login)?);
        let response = self.get(&url, token, login).await?;
        let status = response.status().as_u16();
        let profile: UserProfile = Self::parse_json(response).await?;

        if profile.login().is_none() {
            tracing::warn!(login, "Intranet user payload has no login");
            return Err(AppError::Api {
                status,
                detail: "user payload has no login".to_string(),
            });
        }

        Ok(profile)
    }

    /// Fetch a user's project enrollments.
    ///
    /// Never fails: any error degrades to [`ProjectLookup::Unavailable`].
    pub async fn lookup_projects(&self, token: &AccessToken, login: &str) -> ProjectLookup {
        match self.try_lookup_projects(token, login).await {
            Ok(records) => ProjectLookup::Available(records),
            Err(e) => {
                tracing::warn!(login, error = %e, "Projects lookup failed, continuing without projects");
                ProjectLookup::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Fetch a user's project enrollments, propagating errors.
    pub async fn try_lookup_projects(
        &self,
        token: &AccessToken,
        login: &str,
    ) -> Result<Vec<ProjectRecord>, AppError> {
        let url = format!(
            "{}/{}/projects_users",
            self.users_endpoint(),
            path_segment(login)?
        );
        let response = self.get(&url, token, login).await?;
        Self::parse_json(response).await
    }

    /// Bearer-authenticated GET, with the status already checked.
    async fn get(
        &self,
        url: &str,
        token: &AccessToken,
        login: &str,
    ) -> Result<reqwest::Response, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token.value())
            .send()
            .await
            .map_err(AppError::from_transport)?;

        Self::check_response(response, login).await
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        let status = response.status().as_u16();
        response.json().await.map_err(|e| AppError::Api {
            status,
            detail: format!("JSON parse error: {}", e),
        })
    }

    /// Check response status and return error if not successful.
    async fn check_response(
        response: reqwest::Response,
        login: &str,
    ) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("No user with login {}", login)));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, login, "Intranet API request failed");
        Err(AppError::Api {
            status: status.as_u16(),
            detail: body,
        })
    }
}

/// Encode `login` as one path segment under `/v2/users`.
///
/// Blank and dot-segment logins are refused here: they would otherwise
/// address `/v2/users` itself or its parent once the URL is normalized.
fn path_segment(login: &str) -> Result<Cow<'_, str>, AppError> {
    if login.trim().is_empty() || login::is_dot_segment(login) {
        return Err(AppError::BadRequest(format!("{:?} is not a login", login)));
    }
    Ok(login::encode(login))
}

/// Token endpoint response. `access_token` is optional so a body without it
/// is reported as an auth failure instead of a parse error.
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}
