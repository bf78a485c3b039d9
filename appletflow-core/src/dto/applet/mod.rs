//! Applet DTOs

use serde::{Deserialize, Serialize};

use crate::domain::applet::SchemaTag;
use crate::domain::price::Price;

/// Raw registration form as submitted by a user
///
/// Nothing is validated yet; the catalog service turns this into a [`NewApplet`]
/// or rejects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterApplet {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as typed, e.g. "0.05"
    pub price: String,
    #[serde(default)]
    pub input_schema: SchemaTag,
    #[serde(default)]
    pub output_schema: SchemaTag,
}

/// Validated registration, ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApplet {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub input_schema: SchemaTag,
    pub output_schema: SchemaTag,
    pub owner: String,
}
