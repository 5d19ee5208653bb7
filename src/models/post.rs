//! Post data structure.

use serde::{Deserialize, Serialize};

/// A discussion thread within a topic.
///
/// The `id` is assigned by the backend on create and is immutable
/// once issued; the client never makes one up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Server-assigned identifier
    #[serde(rename = "ID")]
    pub id: u64,

    /// Name of the owning topic
    #[serde(rename = "topic_title")]
    pub topic: String,

    /// Post title
    pub title: String,

    /// Author identity
    #[serde(rename = "user_name")]
    pub author: String,

    /// Post body
    pub body: String,
}
