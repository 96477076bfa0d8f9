// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! In-memory application harness that drives the full Axum router without
//! binding a socket. Requests go through the real middleware stack, so
//! authentication and authorization behave exactly as in production.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use warden_api::{ApiServer, AppState};
use warden_cache::MemoryCacheStore;
use warden_core::{MemoryStore, PermissionRegistry};

use super::fixtures::{test_api_config, UserFixtures, TEST_PASSWORD};

/// Response from a harness request: status code plus parsed JSON body.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body. `Value::Null` when the body is empty.
    pub body: Value,
}

impl TestResponse {
    /// Extracts a string field from the body, panicking with context on
    /// absence.
    pub fn str_field(&self, name: &str) -> &str {
        self.body
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("missing string field '{}' in {}", name, self.body))
    }

    /// Extracts an integer field from the body.
    pub fn int_field(&self, name: &str) -> i64 {
        self.body
            .get(name)
            .and_then(Value::as_i64)
            .unwrap_or_else(|| panic!("missing integer field '{}' in {}", name, self.body))
    }

    /// Returns the error code from an error body.
    pub fn error_code(&self) -> &str {
        self.body
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("missing error code in {}", self.body))
    }
}

/// In-memory application under test.
pub struct TestApp {
    router: Router,
    /// Shared application state, exposed for direct service access.
    pub state: AppState,
    /// The backing store, exposed for direct seeding and inspection.
    pub store: Arc<MemoryStore>,
    /// The cache backend, exposed for inspection.
    pub cache: Arc<MemoryCacheStore>,
}

impl TestApp {
    /// Builds a fresh application with an empty store and cache.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let cache = Arc::new(MemoryCacheStore::new());

        let state = AppState::builder()
            .config(test_api_config())
            .store(store.clone())
            .cache_store(cache.clone())
            .registry(Arc::new(PermissionRegistry::builtin()))
            .build()
            .expect("failed to build test state");

        let router = ApiServer::new(state.clone()).router();

        Self {
            router,
            state,
            store,
            cache,
        }
    }

    /// Sends a request through the router.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            // Framework rejections (e.g. an over-limit body) are plain text.
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    /// GET shorthand.
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, token, None).await
    }

    /// POST shorthand.
    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, path, token, Some(body)).await
    }

    /// PATCH shorthand.
    pub async fn patch(&self, path: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, token, Some(body)).await
    }

    /// DELETE shorthand.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, path, token, None).await
    }

    /// Registers a user and returns their ID.
    pub async fn register(&self, username: &str) -> i64 {
        let registration = UserFixtures::member(username);
        let response = self
            .post(
                "/api/v1/auth/register",
                None,
                serde_json::json!({
                    "username": registration.username,
                    "password": registration.password,
                    "email": registration.email,
                    "full_name": registration.full_name,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.int_field("id")
    }

    /// Logs a user in and returns their access token.
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .post(
                "/api/v1/auth/login",
                None,
                serde_json::json!({
                    "username": username,
                    "password": TEST_PASSWORD,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.str_field("access_token").to_string()
    }

    /// Registers a user and logs them in, returning `(id, token)`.
    pub async fn register_and_login(&self, username: &str) -> (i64, String) {
        let id = self.register(username).await;
        let token = self.login(username).await;
        (id, token)
    }

    /// Registers the bootstrap admin and returns their token. The `admin`
    /// username grants superuser status at registration.
    pub async fn admin_token(&self) -> String {
        let registration = UserFixtures::admin();
        let response = self
            .post(
                "/api/v1/auth/register",
                None,
                serde_json::json!({
                    "username": registration.username,
                    "password": registration.password,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        self.login("admin").await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
