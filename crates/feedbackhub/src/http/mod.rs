//! HTTP API for feedbackhub.
//!
//! Exposes the four feedback operations plus a liveness probe. Error
//! responses are JSON objects of the shape `{"detail": "..."}`.

mod handlers;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::Result;
use crate::qa::QaClient;
use crate::store::FeedbackStore;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The feedback table.
    pub store: FeedbackStore,
    /// Client for the question answering backend.
    pub qa: QaClient,
}

impl AppState {
    /// Create state from its parts.
    #[must_use]
    pub fn new(store: FeedbackStore, qa: QaClient) -> Self {
        Self { store, qa }
    }
}

/// Build the API router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/feedback",
            post(handlers::submit_feedback).get(handlers::list_feedback),
        )
        .route("/query-feedback", post(handlers::query_feedback))
        .route("/topic-frequency", post(handlers::topic_frequency))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// Serve the API on `bind_addr` until SIGTERM or SIGINT arrives.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: AppState, bind_addr: SocketAddr) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "feedbackhub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("feedbackhub shut down");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::QaConfig;

    fn create_test_state() -> AppState {
        let store = FeedbackStore::open("/tmp/feedbackhub-test/feedback.csv");
        let qa = QaClient::new(&QaConfig::default()).unwrap();
        AppState::new(store, qa)
    }

    #[test]
    fn test_build_router() {
        let _router = build_router(create_test_state());
    }

    #[test]
    fn test_app_state_clone() {
        let state = create_test_state();
        let cloned = state.clone();
        assert_eq!(state.store.path(), cloned.store.path());
    }

    #[test]
    fn test_app_state_debug() {
        let state = create_test_state();
        let debug_str = format!("{state:?}");
        assert!(debug_str.contains("AppState"));
    }
}
