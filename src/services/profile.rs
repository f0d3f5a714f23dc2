// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering-ready view of a profile.
//!
//! Everything here is a pure transform over [`UserProfile`] and
//! [`ProjectLookup`]; no I/O.

use crate::models::{CursusUser, ProjectLookup, ProjectRecord, ProjectStatus, UserProfile};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Skill levels are shown as a share of this maximum.
pub const MAX_SKILL_LEVEL: f64 = 21.0;

/// Cursus slugs considered the main curriculum, in preference order.
const MAIN_CURSUS_SLUGS: [&str; 2] = ["42cursus", "42"];

/// Image candidates, best first.
const IMAGE_URL_POINTERS: [&str; 4] = [
    "/image/versions/large",
    "/image/versions/medium",
    "/image/link",
    "/image_url",
];

/// First non-empty image URL from the priority list.
pub fn image_url(profile: &UserProfile) -> Option<&str> {
    IMAGE_URL_POINTERS
        .iter()
        .filter_map(|pointer| profile.str_at(pointer))
        .find(|url| !url.trim().is_empty())
}

/// The `42cursus`/`42` enrollment if present, else the first one.
pub fn main_cursus(profile: &UserProfile) -> Option<CursusUser> {
    let mut cursus_users = profile.cursus_users();
    let index = cursus_users
        .iter()
        .position(|c| MAIN_CURSUS_SLUGS.contains(&c.cursus.slug.as_str()))
        .unwrap_or(0);
    if cursus_users.is_empty() {
        return None;
    }
    Some(cursus_users.swap_remove(index))
}

/// Skill level as a percentage of [`MAX_SKILL_LEVEL`], two decimals.
pub fn skill_percent(level: f64) -> f64 {
    round2(level / MAX_SKILL_LEVEL * 100.0)
}

/// Placeholder letter when there is no usable image.
pub fn avatar_initial(profile: &UserProfile) -> char {
    profile
        .display_name()
        .and_then(|name| name.chars().next())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('U')
}

/// Human label for a project status.
pub fn status_label(status: &ProjectStatus) -> &str {
    match status {
        ProjectStatus::Finished => "Completed",
        ProjectStatus::InProgress => "In Progress",
        ProjectStatus::WaitingForCorrection => "Waiting",
        ProjectStatus::Other(raw) => raw,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

// ─── View Types ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileView {
    pub login: String,
    pub display_name: String,
    pub avatar_initial: String,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub pool_year: Option<String>,
    pub pool_month: Option<String>,
    pub cursus_name: Option<String>,
    pub grade: Option<String>,
    pub stats: StatsView,
    pub skills: Vec<SkillView>,
    pub projects: Vec<ProjectView>,
    /// False when the projects lookup failed; `projects` is then empty.
    pub projects_available: bool,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsView {
    pub level: String,
    pub correction_points: String,
    pub wallet: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SkillView {
    pub name: String,
    pub level: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProjectView {
    pub name: String,
    pub slug: String,
    pub status: String,
    pub status_label: String,
    pub final_mark: Option<i64>,
    pub validated: Option<bool>,
}

impl From<&ProjectRecord> for ProjectView {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            name: record.project_name.clone(),
            slug: record.project_slug.clone(),
            status: record.status.as_str().to_string(),
            status_label: status_label(&record.status).to_string(),
            final_mark: record.final_mark,
            validated: record.validated,
        }
    }
}

impl ProfileView {
    pub fn build(profile: &UserProfile, projects: &ProjectLookup) -> Self {
        let cursus = main_cursus(profile);

        let skills = cursus
            .as_ref()
            .map(|c| {
                c.skills
                    .iter()
                    .map(|s| SkillView {
                        name: s.name.clone(),
                        level: s.level,
                        percent: skill_percent(s.level),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            login: profile.login().unwrap_or("unknown").to_string(),
            display_name: profile.display_name().unwrap_or("Unknown").to_string(),
            avatar_initial: avatar_initial(profile).to_string(),
            image_url: image_url(profile).map(str::to_string),
            location: profile.location().map(str::to_string),
            email: profile.email().map(str::to_string),
            pool_year: profile.pool_year().map(str::to_string),
            pool_month: profile.pool_month().map(str::to_string),
            cursus_name: cursus
                .as_ref()
                .map(|c| c.cursus.name.clone())
                .filter(|n| !n.is_empty()),
            grade: cursus.as_ref().and_then(|c| c.grade.clone()),
            stats: StatsView {
                level: fixed2(cursus.as_ref().map(|c| c.level).unwrap_or(0.0)),
                correction_points: fixed2(profile.correction_point().unwrap_or(0.0)),
                wallet: fixed2(profile.wallet().unwrap_or(0.0)),
            },
            skills,
            projects: projects.records().iter().map(ProjectView::from).collect(),
            projects_available: projects.is_available(),
        }
    }
}
