//! Summarization transform
//!
//! Prefers the remote summarizer. Any failure there (no credential, network,
//! bad status, malformed or empty body) falls back to a local heuristic that
//! keeps the first two sentences.

use appletflow_client::{ClientError, Summarizer};
use appletflow_core::domain::applet::{AppletId, well_known};
use appletflow_core::domain::execution::ResultFragment;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use crate::transform::Transform;

/// Text returned when not even a heuristic summary can be produced
pub const NO_SUMMARY: &str = "Could not generate summary.";

/// A run of non-terminators followed by one or more of `.`, `!`, `?`
static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

/// First two sentences of `text`, trimmed and joined by a single space
///
/// Text without any sentence terminator is treated as a single sentence.
pub fn heuristic_summary(text: &str) -> String {
    let sentences: Vec<&str> = SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(2)
        .collect();

    let summary = if sentences.is_empty() {
        text.trim().to_string()
    } else {
        sentences.join(" ")
    };

    if summary.is_empty() {
        NO_SUMMARY.to_string()
    } else {
        summary
    }
}

/// Transform bound to the summarizer applet
pub struct SummarizeTransform {
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizeTransform {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }
}

#[async_trait]
impl Transform for SummarizeTransform {
    fn applet_id(&self) -> AppletId {
        well_known::SUMMARIZER
    }

    fn name(&self) -> &'static str {
        "summarizer"
    }

    async fn apply(&self, input: &str) -> ResultFragment {
        let summary = match self.summarizer.summarize(input).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => {
                warn!("Remote summarizer returned an empty summary, using heuristic");
                heuristic_summary(input)
            }
            Err(ClientError::MissingCredential(_)) => {
                debug!("No summarizer credential configured, using heuristic");
                heuristic_summary(input)
            }
            Err(e) => {
                warn!("Remote summarizer failed: {}, using heuristic", e);
                heuristic_summary(input)
            }
        };
        ResultFragment::Summary(summary)
    }
}
