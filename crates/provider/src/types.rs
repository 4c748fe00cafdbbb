//! Read Request/Response Types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat attribute set of a data source
pub type AttributeMap = Map<String, Value>;

/// Result of a data-source read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResponse {
    /// Empty when the object is not present
    pub id: String,
    pub state: AttributeMap,
}

impl ReadResponse {
    pub fn found(id: impl Into<String>, state: AttributeMap) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }

    /// Not present; `state` carries only the input attributes
    pub fn absent(state: AttributeMap) -> Self {
        Self {
            id: String::new(),
            state,
        }
    }

    pub fn is_present(&self) -> bool {
        !self.id.is_empty()
    }
}
