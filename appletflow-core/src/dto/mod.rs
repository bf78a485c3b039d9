//! Data Transfer Objects
//!
//! This module contains requests passed into the engine services and the
//! wire shapes exchanged with the on-chain registry and logger contracts.
//! Contract shapes use snake_case keys and integer smallest-unit prices.

pub mod applet;
pub mod contract;
pub mod execution;
