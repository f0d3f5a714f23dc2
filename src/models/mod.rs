// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod project;
pub mod token;
pub mod user;

pub use project::{ProjectLookup, ProjectRecord, ProjectStatus};
pub use token::{AccessToken, Credentials};
pub use user::{CursusUser, Skill, UserProfile};
