//! Topic data structure.

use serde::{Deserialize, Serialize};

/// A top-level discussion category, identified by its unique name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    /// Unique, whitespace-free identifier
    #[serde(rename = "topic_name")]
    pub name: String,

    /// Free-form description
    pub description: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
