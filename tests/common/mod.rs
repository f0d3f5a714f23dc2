// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stub intranet API for integration tests.
//!
//! Each test builds an axum router standing in for `api.intra.42.fr`, binds it
//! to an ephemeral localhost port and points an `IntraClient` at it.

use axum::{
    extract::Form,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use intra_companion::config::Config;
use intra_companion::models::Credentials;
use intra_companion::routes::create_router;
use intra_companion::services::IntraClient;
use intra_companion::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub saw.
#[derive(Default)]
pub struct StubLog {
    pub token_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub project_calls: AtomicUsize,
    pub last_form: Mutex<Option<HashMap<String, String>>>,
    pub last_auth: Mutex<Option<String>>,
    pub last_path: Mutex<Option<String>>,
}

impl StubLog {
    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn project_calls(&self) -> usize {
        self.project_calls.load(Ordering::SeqCst)
    }

    pub fn last_form(&self) -> Option<HashMap<String, String>> {
        self.last_form.lock().unwrap().clone()
    }

    pub fn last_auth(&self) -> Option<String> {
        self.last_auth.lock().unwrap().clone()
    }

    pub fn last_path(&self) -> Option<String> {
        self.last_path.lock().unwrap().clone()
    }
}

/// Canned behavior for one stub endpoint.
#[derive(Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
    /// Sleep, then answer with the inner reply.
    Delayed(Duration, Box<Reply>),
    /// Successful exchange: `tok123` first, then `tok123-2`, `tok123-3`, ...
    IssueToken,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Reply::Json(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode) -> Self {
        Reply::Json(status, json!({"error": "stub"}))
    }

    pub fn delayed(delay: Duration, reply: Reply) -> Self {
        Reply::Delayed(delay, Box::new(reply))
    }

    async fn respond(self) -> axum::response::Response {
        let mut reply = self;
        loop {
            match reply {
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
                Reply::Json(status, body) => return (status, Json(body)).into_response(),
                Reply::Text(status, body) => return (status, body).into_response(),
                Reply::IssueToken => {
                    return (StatusCode::OK, Json(json!({"access_token": "tok123"})))
                        .into_response()
                }
            }
        }
    }
}

/// Stub configuration. User replies are chosen per login.
pub struct Stub {
    pub token: Reply,
    pub users: HashMap<String, Reply>,
    pub projects: Reply,
}

impl Default for Stub {
    fn default() -> Self {
        Self {
            token: Reply::IssueToken,
            users: HashMap::new(),
            projects: Reply::ok(json!([])),
        }
    }
}

impl Stub {
    pub fn with_user(mut self, login: &str, reply: Reply) -> Self {
        self.users.insert(login.to_string(), reply);
        self
    }

    pub fn with_token(mut self, reply: Reply) -> Self {
        self.token = reply;
        self
    }

    pub fn with_projects(mut self, reply: Reply) -> Self {
        self.projects = reply;
        self
    }

    /// Bind to an ephemeral port; returns the base URL and the request log.
    pub async fn spawn(self) -> (String, Arc<StubLog>) {
        let log = Arc::new(StubLog::default());
        let stub = Arc::new(self);

        let token_log = log.clone();
        let token_stub = stub.clone();
        let user_log = log.clone();
        let user_stub = stub.clone();
        let projects_log = log.clone();
        let projects_stub = stub.clone();

        let app = Router::new()
            .route(
                "/oauth/token",
                post(move |Form(form): Form<HashMap<String, String>>| {
                    let log = token_log.clone();
                    let stub = token_stub.clone();
                    async move {
                        let n = log.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
                        *log.last_form.lock().unwrap() = Some(form);
                        match &stub.token {
                            Reply::IssueToken => {
                                let token = if n == 1 {
                                    "tok123".to_string()
                                } else {
                                    format!("tok123-{}", n)
                                };
                                let body = json!({
                                    "access_token": token,
                                    "token_type": "bearer",
                                    "expires_in": 7200,
                                    "scope": "public"
                                });
                                Reply::ok(body).respond().await
                            }
                            reply => reply.clone().respond().await,
                        }
                    }
                }),
            )
            .route(
                "/v2/users/{login}",
                get(move |uri: Uri, headers: HeaderMap, axum::extract::Path(login): axum::extract::Path<String>| {
                    let log = user_log.clone();
                    let stub = user_stub.clone();
                    async move {
                        log.user_calls.fetch_add(1, Ordering::SeqCst);
                        record(&log, &uri, &headers);
                        match stub.users.get(&login) {
                            Some(reply) => reply.clone().respond().await,
                            None => Reply::status(StatusCode::NOT_FOUND).respond().await,
                        }
                    }
                }),
            )
            .route(
                "/v2/users/{login}/projects_users",
                get(move |uri: Uri, headers: HeaderMap| {
                    let log = projects_log.clone();
                    let stub = projects_stub.clone();
                    async move {
                        log.project_calls.fetch_add(1, Ordering::SeqCst);
                        record(&log, &uri, &headers);
                        stub.projects.clone().respond().await
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        (format!("http://{}", addr), log)
    }
}

fn record(log: &StubLog, uri: &Uri, headers: &HeaderMap) {
    *log.last_path.lock().unwrap() = Some(uri.path().to_string());
    *log.last_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
}

/// Base URL where nothing is listening.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn test_client(base_url: &str) -> IntraClient {
    IntraClient::new(base_url, Duration::from_millis(500)).expect("client")
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials::new("abc", "xyz")
}

/// Profile fixture used across tests.
#[allow(dead_code)]
pub fn jdoe_profile() -> Value {
    json!({
        "login": "jdoe",
        "displayname": "John Doe",
        "cursus_users": [{"cursus": {"slug": "42cursus"}, "level": 5.43}]
    })
}

/// Create a test app whose client talks to `base_url`.
/// Returns the router and the shared state; no session is established.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.client_id = "abc".to_string();
    config.client_secret = "xyz".to_string();
    config.api_url = base_url.to_string();

    let state = Arc::new(AppState::new(config, test_client(base_url)));
    (create_router(state.clone()), state)
}
