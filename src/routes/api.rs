// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile search and session routes.

use crate::error::{AppError, Result};
use crate::services::{Login, ProfileView};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session/reconnect", post(reconnect))
        .route("/api/users/{login}", get(get_user))
}

// ─── Session ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub connected: bool,
    pub obtained_at: String,
}

/// Discard the current token and run the token exchange again.
async fn reconnect(State(state): State<Arc<AppState>>) -> Result<Json<SessionResponse>> {
    let session = state.connect().await.inspect_err(|e| {
        tracing::warn!(error = %e, retryable = e.is_retryable(), "Reconnect failed");
    })?;

    tracing::info!("Intranet session re-established");
    Ok(Json(SessionResponse {
        connected: true,
        obtained_at: session.token().obtained_at().to_rfc3339(),
    }))
}

// ─── Profile Search ──────────────────────────────────────────

/// Look up a login and return its profile view.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(raw_login): Path<String>,
) -> Result<Json<ProfileView>> {
    let login = Login::parse(&raw_login)?;
    let session = state
        .current_session()
        .await
        .ok_or(AppError::NotConnected)?;

    let result = session.fetch_profile(login.as_str()).await?;
    Ok(Json(ProfileView::build(&result.profile, &result.projects)))
}
