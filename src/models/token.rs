// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credentials and the bearer token obtained with them.

use chrono::{DateTime, Utc};
use std::fmt;

/// OAuth client credentials for the intranet application.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Both halves are present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

// Never print the secret.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token from a client-credentials exchange.
///
/// Lives in process memory only. Expiry is not tracked: a token is treated as
/// valid until the session that owns it is replaced.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    obtained_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, obtained_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            obtained_at,
        }
    }

    /// Raw bearer string for the `Authorization` header.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}
