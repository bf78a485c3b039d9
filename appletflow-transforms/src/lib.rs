//! Appletflow Transforms
//!
//! This crate provides the applet behaviours the pipeline executor dispatches to.
//! It includes:
//! - The `Transform` trait and a registry keyed by applet id
//! - Built-in transforms: sentiment analysis, summarization, price oracle
//! - The sentiment lexicon and tokenizer

pub mod builtin;
pub mod transform;

pub use builtin::{
    PriceOracleTransform, SentimentAnalyzer, SentimentTransform, SummarizeTransform,
    default_registry, heuristic_summary,
};
pub use transform::{Transform, TransformError, TransformRegistry};
