//! Client for the pretrained question answering model.
//!
//! The model is hosted behind an inference endpoint speaking the standard
//! extractive question-answering request shape: the client POSTs a
//! `{"inputs": {"question": ..., "context": ...}}` body to
//! `{endpoint}/models/{model}` and decodes the answer span from the reply.

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::QaConfig;
use crate::error::{Error, Result};

/// Request body for a question answering invocation.
#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

/// The (question, context) pair the model extracts an answer from.
#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

/// A decoded answer from the question answering model.
#[derive(Debug, Clone, Deserialize)]
pub struct QaAnswer {
    /// The extracted answer text.
    pub answer: String,
    /// Model confidence in the answer, when reported.
    #[serde(default)]
    pub score: f64,
    /// Byte offset of the answer start within the context, when reported.
    #[serde(default)]
    pub start: Option<usize>,
    /// Byte offset of the answer end within the context, when reported.
    #[serde(default)]
    pub end: Option<usize>,
}

/// HTTP client for the question answering backend.
#[derive(Clone)]
pub struct QaClient {
    client: Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

impl fmt::Debug for QaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QaClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl QaClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &QaConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// The model identifier this client queries.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model a question against the given context.
    ///
    /// One request per invocation; no retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend responds with a
    /// non-success status, the reply cannot be decoded, or the answer is
    /// blank.
    pub async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer> {
        let url = format!(
            "{}/models/{}",
            self.endpoint.trim_end_matches('/'),
            self.model
        );

        let request = QaRequest {
            inputs: QaInputs { question, context },
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::qa_backend(status.as_u16(), body));
        }

        let answer: QaAnswer = response.json().await?;
        if answer.answer.trim().is_empty() {
            return Err(Error::QaEmptyAnswer);
        }

        Ok(answer)
    }
}
