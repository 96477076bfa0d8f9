// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT authentication middleware.

use std::collections::HashSet;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use uuid::Uuid;
use warden_core::UserStore;

use crate::auth::{AuthContext, JwtManager};
use crate::error::ApiError;

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer for JWT authentication.
///
/// Wraps services to validate the bearer token, load the subject user from
/// the store, and attach an [`AuthContext`] to the request. Public paths
/// pass through with an anonymous context.
#[derive(Clone)]
pub struct AuthLayer {
    jwt_manager: Arc<JwtManager>,
    user_store: Arc<dyn UserStore>,
    public_paths: Arc<HashSet<String>>,
}

impl AuthLayer {
    /// Creates a new auth layer.
    pub fn new(jwt_manager: Arc<JwtManager>, user_store: Arc<dyn UserStore>) -> Self {
        Self {
            jwt_manager,
            user_store,
            public_paths: Arc::new(HashSet::new()),
        }
    }

    /// Adds public paths that don't require authentication.
    pub fn with_public_paths(mut self, paths: Vec<String>) -> Self {
        self.public_paths = Arc::new(paths.into_iter().collect());
        self
    }

    /// Creates with default public paths.
    pub fn with_default_public_paths(self) -> Self {
        self.with_public_paths(vec![
            "/health".to_string(),
            "/api/v1/auth/login".to_string(),
            "/api/v1/auth/register".to_string(),
        ])
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt_manager: self.jwt_manager.clone(),
            user_store: self.user_store.clone(),
            public_paths: self.public_paths.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware for JWT authentication.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt_manager: Arc<JwtManager>,
    user_store: Arc<dyn UserStore>,
    public_paths: Arc<HashSet<String>>,
}

impl<S> AuthMiddleware<S> {
    /// Checks if a path is public.
    fn is_public_path(&self, path: &str) -> bool {
        if self.public_paths.contains(path) {
            return true;
        }

        // Prefix matches for patterns ending in '*'
        for public_path in self.public_paths.iter() {
            if let Some(prefix) = public_path.strip_suffix('*') {
                if path.starts_with(prefix) {
                    return true;
                }
            }
        }

        false
    }
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let jwt_manager = self.jwt_manager.clone();
        let user_store = self.user_store.clone();
        let is_public = self.is_public_path(req.uri().path());
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let request_id = Uuid::now_v7();

            let client_ip = req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip());

            // Skip auth for public paths
            if is_public {
                let mut auth_ctx = AuthContext::anonymous().with_request_id(request_id);
                if let Some(ip) = client_ip {
                    auth_ctx = auth_ctx.with_client_ip(ip);
                }
                req.extensions_mut().insert(auth_ctx);
                return inner.call(req).await;
            }

            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!("No authorization token provided");
                    return Ok(ApiError::invalid_token("No authorization token provided")
                        .into_response());
                }
            };

            let user_id = match jwt_manager.verify_user_id(&token) {
                Ok(user_id) => user_id,
                Err(e) => return Ok(e.into_response()),
            };

            // A valid token for a deleted user must not authenticate.
            let user = match user_store.get_user(user_id).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    tracing::debug!(user_id, "Token subject no longer exists");
                    return Ok(ApiError::invalid_token("Unknown token subject").into_response());
                }
                Err(e) => {
                    return Ok(ApiError::from(e).into_response());
                }
            };

            if !user.is_active {
                return Ok(ApiError::forbidden("Inactive user").into_response());
            }

            let mut auth_ctx = AuthContext::authenticated(user).with_request_id(request_id);
            if let Some(ip) = client_ip {
                auth_ctx = auth_ctx.with_client_ip(ip);
            }
            req.extensions_mut().insert(auth_ctx);

            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::MemoryStore;

    #[test]
    fn test_extract_bearer_token() {
        use axum::http::HeaderValue;

        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();

        // No header
        assert!(extract_bearer_token(&req).is_none());

        // Invalid format
        req.headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer_token(&req).is_none());

        // Valid bearer token
        req.headers_mut().insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer mytoken123"),
        );
        assert_eq!(extract_bearer_token(&req), Some("mytoken123".to_string()));
    }

    #[test]
    fn test_public_paths() {
        let jwt_manager = Arc::new(
            JwtManager::new(crate::auth::JwtConfig::new(
                "test-secret-key-for-testing-only",
            ))
            .unwrap(),
        );
        let store: Arc<dyn UserStore> = Arc::new(MemoryStore::new());

        let layer = AuthLayer::new(jwt_manager, store)
            .with_public_paths(vec!["/health".to_string(), "/api/v1/auth/*".to_string()]);

        let middleware = layer.layer(tower::service_fn(|_req: Request<Body>| async {
            Ok::<_, std::convert::Infallible>(Response::new(Body::empty()))
        }));

        assert!(middleware.is_public_path("/health"));
        assert!(middleware.is_public_path("/api/v1/auth/login"));
        assert!(!middleware.is_public_path("/api/v1/roles"));
    }
}
