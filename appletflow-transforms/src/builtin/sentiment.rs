//! Sentiment analysis transform
//!
//! Scores text against the valence lexicon. A token directly preceded by a
//! negator ("not", "don't", ...) contributes its negated valence.

use appletflow_core::domain::applet::{AppletId, well_known};
use appletflow_core::domain::execution::{ResultFragment, SentimentReport};
use async_trait::async_trait;
use tracing::debug;

use super::lexicon;
use crate::transform::Transform;

/// Punctuation removed before splitting into tokens
const STRIPPED: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`', '"', '~',
    '(', ')',
];

/// Lexicon-based sentiment scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercases, strips punctuation and splits on whitespace
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .chars()
            .filter(|c| !STRIPPED.contains(c))
            .collect::<String>()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn analyze(&self, text: &str) -> SentimentReport {
        let tokens = self.tokenize(text);
        let mut report = SentimentReport::default();

        for (idx, token) in tokens.iter().enumerate() {
            let Some(mut valence) = lexicon::valence(token) else {
                continue;
            };
            if idx > 0 && lexicon::is_negator(&tokens[idx - 1]) {
                valence = -valence;
            }

            report.score += valence;
            report.words.push(token.clone());
            if valence > 0 {
                report.positive.push(token.clone());
            } else {
                report.negative.push(token.clone());
            }
        }

        report.comparative = if tokens.is_empty() {
            0.0
        } else {
            f64::from(report.score) / tokens.len() as f64
        };
        report.tokens = tokens;
        report
    }
}

/// Transform bound to the sentiment-analysis applet
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentTransform {
    analyzer: SentimentAnalyzer,
}

impl SentimentTransform {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transform for SentimentTransform {
    fn applet_id(&self) -> AppletId {
        well_known::SENTIMENT_ANALYSIS
    }

    fn name(&self) -> &'static str {
        "sentiment"
    }

    async fn apply(&self, input: &str) -> ResultFragment {
        let report = self.analyzer.analyze(input);
        debug!(
            "Sentiment score {} over {} tokens",
            report.score,
            report.tokens.len()
        );
        ResultFragment::Sentiment(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let report = SentimentAnalyzer::new().analyze("I love this, it is wonderful and great");
        assert_eq!(report.score, 10);
        assert_eq!(report.words, vec!["love", "wonderful", "great"]);
        assert_eq!(report.positive.len(), 3);
        assert!(report.negative.is_empty());
        assert_eq!(report.tokens.len(), 8);
        assert!((report.comparative - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_text() {
        let report = SentimentAnalyzer::new().analyze("I hate this, it is terrible and awful");
        assert!(report.score < 0);
        assert_eq!(report.score, -9);
        assert_eq!(report.negative, vec!["hate", "terrible", "awful"]);
    }

    #[test]
    fn test_negation_flips_valence() {
        let report = SentimentAnalyzer::new().analyze("This is not good. I don't hate it!");
        assert_eq!(report.score, 0);
        assert_eq!(report.negative, vec!["good"]);
        assert_eq!(report.positive, vec!["hate"]);
    }

    #[test]
    fn test_tokenizer_strips_punctuation() {
        let tokens = SentimentAnalyzer::new().tokenize("Wow!!  (Really)\nGreat, \"stuff\"");
        assert_eq!(tokens, vec!["wow", "really", "great", "stuff"]);
    }

    #[test]
    fn test_empty_input() {
        let report = SentimentAnalyzer::new().analyze("   ");
        assert_eq!(report.score, 0);
        assert_eq!(report.comparative, 0.0);
        assert!(report.words.is_empty());
    }

    #[tokio::test]
    async fn test_transform_emits_sentiment_fragment() {
        let fragment = SentimentTransform::new().apply("good").await;
        match fragment {
            ResultFragment::Sentiment(report) => assert_eq!(report.score, 3),
            other => panic!("unexpected fragment: {other:?}"),
        }
    }
}
