//! Point resources: food and water.
//!
//! Both are immutable once placed and removed from the world when a
//! creature comes within the configured contact radius.

use serde::{Deserialize, Serialize};

/// A food item. Grants a fixed amount of energy when eaten.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub x: f64,
    pub y: f64,
}

/// A water puddle. Reduces thirst by a fixed amount when drunk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Water {
    pub x: f64,
    pub y: f64,
}

impl Food {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Water {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
