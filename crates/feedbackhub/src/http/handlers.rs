//! Request handlers for the feedback API.

// Handlers without awaits still have to be async to serve as axum routes.
#![allow(clippy::unused_async)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::analytics::{self, TopicFrequency};
use crate::error::Error;
use crate::feedback::{FeedbackEntry, NewFeedback};

use super::AppState;

/// Detail string for requests against a missing or empty table.
const NO_FEEDBACK_DETAIL: &str = "Feedback data not found or is empty.";

/// An error rendered to HTTP clients as a `{"detail": "..."}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    /// Map an analytics error, keeping the empty-table case a 404.
    fn from_analytics(err: &Error, prefix: &str) -> Self {
        if err.is_no_feedback() {
            Self::not_found(NO_FEEDBACK_DETAIL)
        } else {
            Self::internal(format!("{prefix}: {err}"))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Body of `POST /query-feedback`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The free-text question to answer over the stored feedback.
    pub question: String,
}

/// Reply of `POST /query-feedback`.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// The model's answer.
    pub answer: String,
}

/// Body of `POST /topic-frequency`.
#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    /// The topic whose frequency should be estimated.
    pub topic: String,
}

/// `POST /feedback`: append a new entry and return it with its assigned
/// identifier and timestamp.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(submission): Json<NewFeedback>,
) -> Result<Json<FeedbackEntry>, ApiError> {
    let entry = FeedbackEntry::from(submission);
    state
        .store
        .append(&entry)
        .map_err(|err| ApiError::internal(format!("Error processing CSV file: {err}")))?;

    info!(id = %entry.id, category = %entry.category, "stored feedback entry");
    Ok(Json(entry))
}

/// `GET /feedback`: list every stored entry. An absent or empty table is an
/// empty array, not an error.
pub async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackEntry>>, ApiError> {
    let entries = state
        .store
        .load()
        .map_err(|err| ApiError::internal(format!("Error reading CSV file: {err}")))?;

    Ok(Json(entries))
}

/// `POST /query-feedback`: answer a free-text question over the stored
/// feedback.
pub async fn query_feedback(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    info!("answering feedback query");
    let answer =
        analytics::answer_question_from_csv(&state.qa, &request.question, state.store.path())
            .await
            .map_err(|err| ApiError::from_analytics(&err, "Error processing query"))?;

    Ok(Json(QueryResponse { answer }))
}

/// `POST /topic-frequency`: estimate how often a topic appears across the
/// stored feedback.
pub async fn topic_frequency(
    State(state): State<AppState>,
    Json(request): Json<TopicRequest>,
) -> Result<Json<TopicFrequency>, ApiError> {
    info!(topic = %request.topic, "estimating topic frequency");
    let result = analytics::estimate_topic_frequency(&state.qa, &request.topic, state.store.path())
        .await
        .map_err(|err| ApiError::from_analytics(&err, "Error estimating topic frequency"))?;

    Ok(Json(result))
}

/// `GET /healthz`: liveness probe.
pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_api_error_renders_detail_body() {
        let response = ApiError::not_found("missing").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"detail": "missing"}));
    }

    #[test]
    fn test_from_analytics_maps_empty_table_to_404() {
        let err = ApiError::from_analytics(&Error::NoFeedback, "Error processing query");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.detail, "Feedback data not found or is empty.");
    }

    #[test]
    fn test_from_analytics_prefixes_other_errors() {
        let err = ApiError::from_analytics(
            &Error::internal("boom"),
            "Error estimating topic frequency",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail.starts_with("Error estimating topic frequency: "));
        assert!(err.detail.contains("boom"));
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = healthz().await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
