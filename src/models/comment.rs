//! Comment data structure.

use serde::{Deserialize, Serialize};

/// A reply attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Server-assigned identifier
    #[serde(rename = "ID")]
    pub id: u64,

    /// Identifier of the owning post
    pub post_id: u64,

    /// Author identity
    #[serde(rename = "user_name")]
    pub author: String,

    /// Comment body
    pub body: String,
}
