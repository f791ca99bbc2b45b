//! Core feedback types for feedbackhub.
//!
//! This module defines the fundamental data structures for representing
//! submitted feedback, shared by the CSV table and the JSON wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp format used for stored entries, e.g. `2026/08/22, 03:41:07 PM`.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d, %I:%M:%S %p";

/// A submitted feedback entry.
///
/// The serialized field names double as the CSV header and the JSON keys, so
/// they are part of the observable format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Unique identifier, assigned at submission time.
    #[serde(rename = "ID")]
    pub id: String,

    /// Local time of submission, formatted with [`TIMESTAMP_FORMAT`].
    #[serde(rename = "Timestamp")]
    pub timestamp: String,

    /// Caller-supplied category label.
    #[serde(rename = "Category")]
    pub category: String,

    /// The feedback text itself.
    #[serde(rename = "Message")]
    pub message: String,
}

/// A feedback submission, before an identifier and timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    /// Caller-supplied category label.
    #[serde(rename = "Category")]
    pub category: String,

    /// The feedback text itself.
    #[serde(rename = "Message")]
    pub message: String,
}

impl FeedbackEntry {
    /// Create a new entry with the given category and message.
    ///
    /// Automatically assigns a UUID v4 identifier and the current local time.
    #[must_use]
    pub fn new(category: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            category,
            message,
        }
    }
}

impl From<NewFeedback> for FeedbackEntry {
    fn from(submission: NewFeedback) -> Self {
        Self::new(submission.category, submission.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_entry_new() {
        let entry = FeedbackEntry::new("bug".to_string(), "The app crashed.".to_string());

        assert_eq!(entry.category, "bug");
        assert_eq!(entry.message, "The app crashed.");
        assert!(Uuid::parse_str(&entry.id).is_ok());
        assert!(!entry.timestamp.is_empty());
    }

    #[test]
    fn test_feedback_entry_unique_ids() {
        let a = FeedbackEntry::new("bug".to_string(), "first".to_string());
        let b = FeedbackEntry::new("bug".to_string(), "second".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_timestamp_parses_back() {
        let entry = FeedbackEntry::new("ux".to_string(), "test".to_string());
        let parsed = chrono::NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT);
        assert!(parsed.is_ok(), "unparseable timestamp: {}", entry.timestamp);
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = FeedbackEntry::new("ux".to_string(), "too many clicks".to_string());
        let value = serde_json::to_value(&entry).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("ID"));
        assert!(obj.contains_key("Timestamp"));
        assert!(obj.contains_key("Category"));
        assert!(obj.contains_key("Message"));
        assert_eq!(obj.len(), 4);
    }

    #[test]
    fn test_new_feedback_deserialization() {
        let json = r#"{"Category": "feature", "Message": "Please add dark mode"}"#;
        let submission: NewFeedback = serde_json::from_str(json).unwrap();

        assert_eq!(submission.category, "feature");
        assert_eq!(submission.message, "Please add dark mode");
    }

    #[test]
    fn test_from_submission_fills_metadata() {
        let submission = NewFeedback {
            category: "bug".to_string(),
            message: "login loops forever".to_string(),
        };
        let entry = FeedbackEntry::from(submission);

        assert_eq!(entry.category, "bug");
        assert_eq!(entry.message, "login loops forever");
        assert!(Uuid::parse_str(&entry.id).is_ok());
    }

    #[test]
    fn test_feedback_entry_serialization_roundtrip() {
        let entry = FeedbackEntry::new("other".to_string(), "great product".to_string());

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: FeedbackEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(entry, deserialized);
    }
}
