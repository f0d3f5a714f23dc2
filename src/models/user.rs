//! Intranet user profile.
//!
//! The API schema is owned by the intranet, so the profile is kept as the raw
//! JSON document and fields are read on demand. Serializing a `UserProfile`
//! yields exactly what was received.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User profile as returned by `GET /v2/users/{login}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Value);

impl UserProfile {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The untouched JSON document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn login(&self) -> Option<&str> {
        self.str_at("/login")
    }

    pub fn display_name(&self) -> Option<&str> {
        self.str_at("/displayname")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_at("/email")
    }

    pub fn location(&self) -> Option<&str> {
        self.str_at("/location")
    }

    pub fn pool_year(&self) -> Option<&str> {
        self.str_at("/pool_year")
    }

    pub fn pool_month(&self) -> Option<&str> {
        self.str_at("/pool_month")
    }

    pub fn correction_point(&self) -> Option<f64> {
        self.0.pointer("/correction_point").and_then(Value::as_f64)
    }

    pub fn wallet(&self) -> Option<f64> {
        self.0.pointer("/wallet").and_then(Value::as_f64)
    }

    /// Cursus enrollments. Entries that don't match the expected shape are skipped.
    pub fn cursus_users(&self) -> Vec<CursusUser> {
        self.0
            .get("cursus_users")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| CursusUser::deserialize(entry).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// String at a JSON pointer; null and non-string values read as `None`.
    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.0.pointer(pointer).and_then(Value::as_str)
    }
}

/// One cursus enrollment with its level and skills.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CursusUser {
    pub cursus: Cursus,
    #[serde(default)]
    pub level: f64,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cursus {
    #[serde(default)]
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: f64,
}
