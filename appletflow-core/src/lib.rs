//! Appletflow Core
//!
//! Core types and abstractions for the Appletflow marketplace and pipeline builder.
//!
//! This crate contains:
//! - Domain types: Core business entities (Applet, Pipeline, execution records, etc.)
//! - DTOs: Requests and wire shapes exchanged with services and collaborators

pub mod domain;
pub mod dto;

pub use domain::applet::{Applet, AppletId, SchemaTag};
pub use domain::execution::{
    CryptoPrice, ExecutionLogEntry, ExecutionResult, ExecutionStatus, ResultFragment,
    SentimentReport,
};
pub use domain::pipeline::{Pipeline, SchemaWarning};
pub use domain::price::{Price, PriceError};
