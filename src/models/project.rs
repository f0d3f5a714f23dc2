// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Project enrollment records from `GET /v2/users/{login}/projects_users`.

use serde::{Deserialize, Serialize};

/// A user's enrollment in one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireProjectUser")]
pub struct ProjectRecord {
    pub project_name: String,
    pub project_slug: String,
    pub final_mark: Option<i64>,
    pub status: ProjectStatus,
    pub validated: Option<bool>,
}

/// Shape of a `projects_users` entry as the API sends it.
#[derive(Deserialize)]
struct WireProjectUser {
    project: WireProject,
    #[serde(default)]
    final_mark: Option<i64>,
    #[serde(default)]
    status: ProjectStatus,
    #[serde(default, rename = "validated?", alias = "validated")]
    validated: Option<bool>,
}

#[derive(Deserialize)]
struct WireProject {
    name: String,
    slug: String,
}

impl From<WireProjectUser> for ProjectRecord {
    fn from(wire: WireProjectUser) -> Self {
        Self {
            project_name: wire.project.name,
            project_slug: wire.project.slug,
            final_mark: wire.final_mark,
            status: wire.status,
            validated: wire.validated,
        }
    }
}

/// Project progress. Unrecognized API values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    InProgress,
    Finished,
    WaitingForCorrection,
    Other(String),
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Other(String::new())
    }
}

impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "in_progress" => ProjectStatus::InProgress,
            "finished" => ProjectStatus::Finished,
            "waiting_for_correction" => ProjectStatus::WaitingForCorrection,
            _ => ProjectStatus::Other(raw),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl ProjectStatus {
    /// Wire value of the status.
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Finished => "finished",
            ProjectStatus::WaitingForCorrection => "waiting_for_correction",
            ProjectStatus::Other(raw) => raw,
        }
    }
}

/// Outcome of the best-effort projects lookup.
///
/// `Available(vec![])` means the user has no projects; `Unavailable` means the
/// lookup failed and the list is unknown.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectLookup {
    Available(Vec<ProjectRecord>),
    Unavailable { reason: String },
}

impl ProjectLookup {
    pub fn is_available(&self) -> bool {
        matches!(self, ProjectLookup::Available(_))
    }

    /// Projects to display; empty when unavailable.
    pub fn records(&self) -> &[ProjectRecord] {
        match self {
            ProjectLookup::Available(records) => records,
            ProjectLookup::Unavailable { .. } => &[],
        }
    }
}
