// src/services/mod.rs

//! Mutation services, one per entity.
//!
//! Every service follows the same contract: validate client-side,
//! submit through the API client, and on success invalidate exactly
//! the cache keys whose displayed collections changed. On failure
//! the cache is untouched and the error propagates to the caller so
//! form state can be retained for a retry. Validation here is
//! advisory; the backend remains the authority and may still reject.

mod comments;
mod posts;
mod topics;

pub use comments::CommentService;
pub use posts::PostService;
pub use topics::{TopicService, validate_topic_name};

use crate::error::{AppError, Result};

/// Require a non-empty text field before submission.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
