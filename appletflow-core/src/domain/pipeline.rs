//! Pipeline domain types
//!
//! A pipeline is the user-composed, ordered list of applets awaiting execution.
//! It lives only for a single build/execute interaction and is never persisted
//! on its own; executions record the applet ids instead.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::applet::{Applet, AppletId, SchemaTag};
use crate::domain::price::{Price, PriceError};

/// Ordered multiset of applets (the same applet may appear more than once)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    stages: Vec<Applet>,
}

/// Advisory warning for two adjacent stages whose schemas disagree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaWarning {
    /// Index of the later stage of the mismatched pair
    pub stage_index: usize,
    pub producer: String,
    pub consumer: String,
    pub output: SchemaTag,
    pub input: SchemaTag,
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stage {}: '{}' outputs {} but '{}' expects {}",
            self.stage_index + 1,
            self.producer,
            self.output,
            self.consumer,
            self.input
        )
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an applet as the last stage
    pub fn append(&mut self, applet: Applet) {
        self.stages.push(applet);
    }

    /// Removes the stage at `index`
    ///
    /// Returns `None` and leaves the pipeline untouched when `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<Applet> {
        if index < self.stages.len() {
            Some(self.stages.remove(index))
        } else {
            None
        }
    }

    /// Swaps the stage at `index` with its predecessor
    ///
    /// Returns `false` (no change) for the first stage or an out-of-bounds index.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.stages.len() {
            return false;
        }
        self.stages.swap(index - 1, index);
        true
    }

    /// Swaps the stage at `index` with its successor
    ///
    /// Returns `false` (no change) for the last stage or an out-of-bounds index.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.stages.len() {
            return false;
        }
        self.stages.swap(index, index + 1);
        true
    }

    /// Sum of all stage prices in smallest units; zero for an empty pipeline
    pub fn total_price(&self) -> Result<Price, PriceError> {
        Price::total(self.stages.iter().map(|applet| &applet.price))
    }

    /// Checks each adjacent pair of stages for schema compatibility
    ///
    /// Warnings are advisory; whether they block execution is decided by the caller.
    pub fn validate(&self) -> Vec<SchemaWarning> {
        self.stages
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| !pair[0].output_schema.feeds(pair[1].input_schema))
            .map(|(idx, pair)| SchemaWarning {
                stage_index: idx + 1,
                producer: pair[0].name.clone(),
                consumer: pair[1].name.clone(),
                output: pair[0].output_schema,
                input: pair[1].input_schema,
            })
            .collect()
    }

    /// Applet ids in stage order, duplicates included
    pub fn applet_ids(&self) -> Vec<AppletId> {
        self.stages.iter().map(|applet| applet.id).collect()
    }

    pub fn stages(&self) -> &[Applet] {
        &self.stages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Applet> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn clear(&mut self) {
        self.stages.clear();
    }
}

impl FromIterator<Applet> for Pipeline {
    fn from_iter<T: IntoIterator<Item = Applet>>(iter: T) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}
