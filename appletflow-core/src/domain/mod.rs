//! Core domain types
//!
//! This module contains the core domain structures used across Appletflow crates.
//! These types represent the fundamental business entities and are shared between
//! the engine (for persistence and execution) and the collaborator clients.

pub mod applet;
pub mod execution;
pub mod pipeline;
pub mod price;
