// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod intra;
pub mod login;
pub mod profile;
pub mod session;

pub use intra::IntraClient;
pub use login::Login;
pub use profile::ProfileView;
pub use session::{ProfileResult, SearchOutcome, Session};
