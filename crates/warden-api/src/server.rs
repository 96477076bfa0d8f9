// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::handlers;
use crate::middleware::AuthLayer;
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// This is the main entry point for creating and running the HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let cors = create_cors_layer(&self.config);
        let auth = AuthLayer::new(
            self.state.jwt_manager.clone(),
            self.state.user_store.clone(),
        )
        .with_default_public_paths();

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(DefaultBodyLimit::max(self.config.max_body_size))
            .layer(cors)
            .layer(auth);

        Router::new()
            // Health endpoint (public)
            .route("/health", get(handlers::health))
            // Auth endpoints
            .route("/api/v1/auth/login", post(handlers::login))
            .route("/api/v1/auth/register", post(handlers::register))
            .route("/api/v1/auth/test-token", post(handlers::test_token))
            // Role endpoints
            .route(
                "/api/v1/roles",
                get(handlers::list_roles).post(handlers::create_role),
            )
            .route(
                "/api/v1/roles/{role_id}",
                get(handlers::get_role)
                    .patch(handlers::update_role)
                    .delete(handlers::delete_role),
            )
            // Permission endpoints
            .route(
                "/api/v1/permissions",
                get(handlers::list_permissions).post(handlers::create_permission),
            )
            .route(
                "/api/v1/permissions/{permission_id}",
                get(handlers::get_permission)
                    .patch(handlers::update_permission)
                    .delete(handlers::delete_permission),
            )
            // User-role assignment
            .route(
                "/api/v1/users/{user_id}/roles",
                post(handlers::assign_user_roles),
            )
            // Apply middleware and state
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| crate::error::ApiError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Runs the server with graceful shutdown.
    ///
    /// Once the signal fires, open connections get `shutdown_timeout` to
    /// drain before the server is abandoned.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let shutdown_timeout = self.config.shutdown_timeout;
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
        let signal = async move {
            shutdown_signal.await;
            let _ = drain_tx.send(());
        };

        let server = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(signal);
        let mut server = std::pin::pin!(server.into_future());

        tokio::select! {
            result = &mut server => {
                result.map_err(|e| {
                    crate::error::ApiError::internal(format!("Server error: {}", e))
                })?;
            }
            _ = drain_rx => {
                match tokio::time::timeout(shutdown_timeout, &mut server).await {
                    Ok(result) => result.map_err(|e| {
                        crate::error::ApiError::internal(format!("Server error: {}", e))
                    })?,
                    Err(_) => tracing::warn!(
                        timeout_secs = shutdown_timeout.as_secs(),
                        "Shutdown drain timed out, abandoning open connections"
                    ),
                }
            }
        }

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = &config.cors;

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(cors.max_age));

    if cors.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<_> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if cors.allowed_headers.contains(&"*".to_string()) {
        layer = layer.allow_headers(Any);
    } else {
        layer = layer.allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);
    }

    layer
}

// =============================================================================
// Tests
// =============================================================================
