// src/models/mod.rs

//! Domain models for the forum client.

mod comment;
mod config;
mod post;
mod topic;

// Re-export all public types
pub use comment::Comment;
pub use config::{ApiConfig, Config, OutputConfig, UserConfig};
pub use post::Post;
pub use topic::Topic;
