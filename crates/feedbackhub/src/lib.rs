//! `feedbackhub` - A feedback collection service with model-assisted analytics
//!
//! This library provides the core functionality: a flat CSV-backed feedback
//! table, an HTTP API over it, and analytics that forward stored feedback to
//! a pretrained question answering model.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod http;
pub mod logging;
pub mod qa;
pub mod store;

pub use analytics::{answer_question_from_csv, estimate_topic_frequency, TopicFrequency};
pub use config::Config;
pub use error::{Error, Result};
pub use feedback::{FeedbackEntry, NewFeedback};
pub use http::AppState;
pub use logging::init_logging;
pub use qa::QaClient;
pub use store::FeedbackStore;
