// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login input handling: sanitizing search text and encoding it for URL paths.

use crate::error::AppError;
use std::borrow::Cow;

/// Longest login the intranet hands out.
pub const MAX_LOGIN_LENGTH: usize = 20;

fn is_login_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Trim, drop characters outside `[A-Za-z0-9._-]` and cap at
/// [`MAX_LOGIN_LENGTH`], the way the search box filters keystrokes.
pub fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| is_login_char(*c))
        .take(MAX_LOGIN_LENGTH)
        .collect()
}

/// `.` and `..` survive percent-encoding and are then collapsed by URL path
/// normalization, so they can never name a user.
pub fn is_dot_segment(login: &str) -> bool {
    matches!(login, "." | "..")
}

/// Percent-encode a login for use as a single path segment.
///
/// Callers encode exactly once; [`crate::services::IntraClient`] does it when
/// building request URLs.
pub fn encode(login: &str) -> Cow<'_, str> {
    urlencoding::encode(login)
}

/// A validated intranet login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    /// Validate search input. Surrounding whitespace is ignored; anything else
    /// outside the login charset is rejected rather than stripped.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let login = raw.trim();
        if login.is_empty() {
            return Err(AppError::BadRequest("Please enter a login".to_string()));
        }
        if login.chars().count() > MAX_LOGIN_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Login must be {} characters or less",
                MAX_LOGIN_LENGTH
            )));
        }
        if let Some(bad) = login.chars().find(|c| !is_login_char(*c)) {
            return Err(AppError::BadRequest(format!(
                "Login contains invalid character {:?}",
                bad
            )));
        }
        if is_dot_segment(login) {
            return Err(AppError::BadRequest(format!("{:?} is not a login", login)));
        }
        Ok(Self(login.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
