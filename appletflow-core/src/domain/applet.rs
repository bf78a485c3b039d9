//! Applet domain types

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::price::Price;

/// Identifier of a registered applet
pub type AppletId = u32;

/// Applet ids with a built-in transformation
pub mod well_known {
    use super::AppletId;

    pub const SENTIMENT_ANALYSIS: AppletId = 1;
    pub const SUMMARIZER: AppletId = 5;
    pub const PRICE_ORACLE: AppletId = 6;
}

/// Owner recorded for applets registered without a known wallet address
pub const PLACEHOLDER_OWNER: &str = "0xUser...";

/// Type tag describing the shape an applet consumes or produces
///
/// `JSON` and `Unknown` are wildcards: they are compatible with every other tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum SchemaTag {
    Text,
    Image,
    Csv,
    Json,
    #[default]
    Unknown,
}

impl SchemaTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaTag::Text => "Text",
            SchemaTag::Image => "Image",
            SchemaTag::Csv => "CSV",
            SchemaTag::Json => "JSON",
            SchemaTag::Unknown => "Unknown",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, SchemaTag::Json | SchemaTag::Unknown)
    }

    /// Whether data tagged `self` can feed a stage expecting `input`
    pub fn feeds(&self, input: SchemaTag) -> bool {
        self.is_wildcard() || input.is_wildcard() || *self == input
    }
}

impl FromStr for SchemaTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim().to_ascii_lowercase().as_str() {
            "text" => SchemaTag::Text,
            "image" => SchemaTag::Image,
            "csv" => SchemaTag::Csv,
            "json" => SchemaTag::Json,
            _ => SchemaTag::Unknown,
        };
        Ok(tag)
    }
}

impl From<String> for SchemaTag {
    fn from(value: String) -> Self {
        let Ok(tag) = value.parse::<SchemaTag>();
        tag
    }
}

impl Serialize for SchemaTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered capability descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applet {
    pub id: AppletId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub input_schema: SchemaTag,
    #[serde(default)]
    pub output_schema: SchemaTag,
    #[serde(default)]
    pub owner: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Applet {
    /// Case-insensitive substring match on name or description
    ///
    /// An empty query matches every applet.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
