// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session flow tests: connect, search short-circuiting, stale results.

use axum::http::StatusCode;
use intra_companion::error::AppError;
use intra_companion::services::{SearchOutcome, Session};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{jdoe_profile, test_client, test_credentials, Reply, Stub};

#[tokio::test]
async fn test_connect_then_search_returns_profile_and_projects() {
    let (base_url, log) = Stub::default()
        .with_user("jdoe", Reply::ok(jdoe_profile()))
        .with_projects(Reply::ok(json!([
            {"project": {"name": "Libft", "slug": "libft"}, "final_mark": 100, "status": "finished", "validated?": true}
        ])))
        .spawn()
        .await;

    let session = Session::connect(test_client(&base_url), &test_credentials())
        .await
        .unwrap();
    assert_eq!(session.token().value(), "tok123");

    let outcome = session.search("jdoe").await.unwrap();
    let result = match outcome {
        SearchOutcome::Found(result) => result,
        other => panic!("expected a result, got {:?}", other),
    };

    assert_eq!(result.profile.as_value(), &jdoe_profile());
    assert_eq!(result.projects.records().len(), 1);
    assert_eq!(log.user_calls(), 1);
    assert_eq!(log.project_calls(), 1);
}

#[tokio::test]
async fn test_search_not_found_skips_projects_lookup() {
    let (base_url, log) = Stub::default().spawn().await;

    let session = Session::connect(test_client(&base_url), &test_credentials())
        .await
        .unwrap();

    let err = session.search("nonexistent").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
    assert_eq!(log.user_calls(), 1);
    assert_eq!(log.project_calls(), 0);
}

#[tokio::test]
async fn test_search_with_projects_down_still_returns_profile() {
    let (base_url, _log) = Stub::default()
        .with_user("jdoe", Reply::ok(jdoe_profile()))
        .with_projects(Reply::status(StatusCode::SERVICE_UNAVAILABLE))
        .spawn()
        .await;

    let session = Session::connect(test_client(&base_url), &test_credentials())
        .await
        .unwrap();

    let result = session.fetch_profile("jdoe").await.unwrap();
    assert_eq!(result.profile.login(), Some("jdoe"));
    assert!(!result.projects.is_available());
}

#[tokio::test]
async fn test_connect_fails_without_session_on_rejected_credentials() {
    let (base_url, log) = Stub::default()
        .with_token(Reply::status(StatusCode::UNAUTHORIZED))
        .spawn()
        .await;

    let result = Session::connect(test_client(&base_url), &test_credentials()).await;

    assert!(matches!(result, Err(AppError::Auth(_))));
    assert_eq!(log.user_calls(), 0);
}

#[tokio::test]
async fn test_newer_search_supersedes_older_one() {
    let (base_url, _log) = Stub::default()
        .with_user(
            "slowpoke",
            Reply::delayed(
                Duration::from_millis(300),
                Reply::ok(json!({"login": "slowpoke"})),
            ),
        )
        .with_user("jdoe", Reply::ok(jdoe_profile()))
        .spawn()
        .await;

    let session = Arc::new(
        Session::connect(test_client(&base_url), &test_credentials())
            .await
            .unwrap(),
    );

    let older = {
        let session = session.clone();
        tokio::spawn(async move { session.search("slowpoke").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let newer = session.search("jdoe").await.unwrap();
    let older = older.await.unwrap().unwrap();

    match newer {
        SearchOutcome::Found(result) => assert_eq!(result.profile.login(), Some("jdoe")),
        other => panic!("newest search should win, got {:?}", other),
    }
    assert!(matches!(older, SearchOutcome::Superseded));
}

#[tokio::test]
async fn test_cancelled_search_reports_cancelled() {
    let (base_url, _log) = Stub::default()
        .with_user(
            "jdoe",
            Reply::delayed(Duration::from_millis(400), Reply::ok(jdoe_profile())),
        )
        .spawn()
        .await;

    let session = Session::connect(test_client(&base_url), &test_credentials())
        .await
        .unwrap();

    let outcome = session
        .search_cancellable("jdoe", tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap();
    assert!(matches!(outcome, SearchOutcome::Cancelled));
}

#[tokio::test]
async fn test_uncancelled_search_completes() {
    let (base_url, _log) = Stub::default()
        .with_user("jdoe", Reply::ok(jdoe_profile()))
        .spawn()
        .await;

    let session = Session::connect(test_client(&base_url), &test_credentials())
        .await
        .unwrap();

    let outcome = session
        .search_cancellable("jdoe", std::future::pending::<()>())
        .await
        .unwrap();
    assert!(matches!(outcome, SearchOutcome::Found(_)));
}
