//! Analytics over the stored feedback table.
//!
//! Both operations share one question answering path: load the table, build
//! a context from the `Message` column, and forward a prompted question to
//! the model. Topic-frequency estimation reuses that path once per row by
//! re-serializing each row to its own scratch file.

use std::path::Path;

use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::feedback::FeedbackEntry;
use crate::qa::QaClient;
use crate::store::FeedbackStore;

/// Fixed preamble prepended to every question before it reaches the model.
pub const SYSTEM_PROMPT: &str = "System: You are an AI assistant that provides anonymous transformations of user feedback. Never identify an individual user. Based on the following feedback, answer the question. Question: ";

/// Result of a topic-frequency estimation run.
#[derive(Debug, Clone, Serialize)]
pub struct TopicFrequency {
    /// The topic that was estimated.
    pub topic: String,
    /// Rows the model classified as being about the topic.
    pub matches: usize,
    /// Rows skipped because their per-row invocation failed.
    pub skipped: usize,
    /// Total rows in the table.
    pub total: usize,
    /// `matches` over analyzed rows (total minus skipped); `0.0` when every
    /// row was skipped.
    pub frequency: f64,
}

/// Answer a free-text question over the feedback stored at `csv_path`.
///
/// The context handed to the model is every stored message, shuffled and
/// joined with newlines. The question is prefixed with [`SYSTEM_PROMPT`].
///
/// # Errors
///
/// Returns [`Error::NoFeedback`] when the table is missing or empty,
/// otherwise any store or model error.
pub async fn answer_question_from_csv(
    qa: &QaClient,
    question: &str,
    csv_path: &Path,
) -> Result<String> {
    let entries = FeedbackStore::open(csv_path).load()?;
    if entries.is_empty() {
        return Err(Error::NoFeedback);
    }

    let mut messages: Vec<String> = entries.into_iter().map(|entry| entry.message).collect();
    messages.shuffle(&mut rand::rng());
    let context = messages.join("\n");

    let prompted = format!("{SYSTEM_PROMPT}{question}");
    debug!(rows = messages.len(), "forwarding question to the model");

    let answer = qa.answer(&prompted, &context).await?;
    Ok(answer.answer)
}

/// Estimate how often `topic` appears across the stored feedback.
///
/// Runs the question answering operation once per row, against a scratch
/// CSV file holding just that row, with a yes/no question about the topic.
/// Model calls are sequential. A row whose invocation fails is logged and
/// skipped; the loop continues.
///
/// # Errors
///
/// Returns [`Error::NoFeedback`] when the table is missing or empty, or a
/// store error if the table itself cannot be read.
pub async fn estimate_topic_frequency(
    qa: &QaClient,
    topic: &str,
    csv_path: &Path,
) -> Result<TopicFrequency> {
    let entries = FeedbackStore::open(csv_path).load()?;
    if entries.is_empty() {
        return Err(Error::NoFeedback);
    }

    let question = topic_question(topic);
    let total = entries.len();
    let mut matches = 0;
    let mut skipped = 0;

    for entry in &entries {
        match classify_row(qa, &question, entry).await {
            Ok(answer) => {
                if is_affirmative(&answer) {
                    matches += 1;
                }
            }
            Err(err) => {
                warn!(id = %entry.id, error = %err, "skipping row during topic estimation");
                skipped += 1;
            }
        }
    }

    debug!(topic, matches, skipped, total, "topic estimation finished");

    Ok(TopicFrequency {
        topic: topic.to_string(),
        matches,
        skipped,
        total,
        frequency: ratio(matches, total - skipped),
    })
}

/// Run the shared question answering path against a single row.
async fn classify_row(qa: &QaClient, question: &str, entry: &FeedbackEntry) -> Result<String> {
    let row_file = tempfile::Builder::new()
        .prefix("feedbackhub-row-")
        .suffix(".csv")
        .tempfile()?;
    FeedbackStore::write_entries(row_file.path(), std::slice::from_ref(entry))?;

    answer_question_from_csv(qa, question, row_file.path()).await
}

/// The per-row yes/no question for a topic.
fn topic_question(topic: &str) -> String {
    format!("Is the following feedback about {topic}? Answer yes or no.")
}

/// Whether a model answer counts as a yes.
fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with("yes")
}

#[allow(clippy::cast_precision_loss)]
fn ratio(matches: usize, analyzed: usize) -> f64 {
    if analyzed == 0 {
        0.0
    } else {
        matches as f64 / analyzed as f64
    }
}
