//! Room API server implementation
//!
//! This module wires the room service, the router and the HTTP layers
//! together.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::allocation::RoomService;
use crate::config::{Config, ConfigError};
use crate::storage::{create_sqlite_repository, SharedRoomRepository};

use super::config::ServerConfig;
use super::handlers::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Room operations
    pub service: RoomService,

    /// Server start time
    pub start_time: Instant,
}

// ============================================================================
// Room Server
// ============================================================================

/// HTTP server exposing the room API
pub struct RoomServer {
    config: ServerConfig,
    state: AppState,
}

impl RoomServer {
    /// Create a server over an existing repository
    pub fn new(config: ServerConfig, repo: SharedRoomRepository) -> Result<Self, ServerError> {
        config.validate()?;

        let state = AppState {
            service: RoomService::new(repo),
            start_time: Instant::now(),
        };

        Ok(Self { config, state })
    }

    /// Create a server backed by the SQLite database named in the config
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        config.validate()?;
        let repo = create_sqlite_repository(&config.database.sqlite_path)?;
        Self::new(config.server.clone(), repo)
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone())
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes));

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let addr = self.config.bind_address;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.serve(listener, shutdown_signal).await
    }

    /// Serve on an already bound listener until the signal resolves
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = listener.local_addr().map_err(ServerError::Serve)?;

        tracing::info!(%addr, "Room API listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Room API shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.bind_address,
            cors_enabled: self.config.enable_cors,
            request_logging_enabled: self.config.enable_request_logging,
            max_body_bytes: self.config.max_body_bytes,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
    pub max_body_bytes: usize,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Room API Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             CORS: {}\n\
             Request Logging: {}\n\
             Max Body: {} bytes",
            "",
            self.bind_address,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" },
            self.max_body_bytes
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::error::Error),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
