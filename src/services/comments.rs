// src/services/comments.rs

//! Comment reads and mutations.

use std::sync::Arc;

use super::require_non_empty;
use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::error::{AppError, Result};
use crate::models::{Comment, UserConfig};

/// Service for comments under a post.
#[derive(Clone)]
pub struct CommentService {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    user: UserConfig,
}

impl CommentService {
    pub fn new(api: Arc<ApiClient>, cache: Arc<QueryCache>, user: UserConfig) -> Self {
        Self { api, cache, user }
    }

    /// Cached comment list for a post.
    pub async fn list(&self, post_id: u64) -> Result<Arc<Vec<Comment>>> {
        let api = Arc::clone(&self.api);
        self.cache
            .fetch(QueryKey::Comments(post_id), move || async move {
                api.list_comments(post_id).await
            })
            .await
    }

    /// Find one comment within a post's collection. There is no
    /// single-comment endpoint on the backend.
    pub async fn find(&self, post_id: u64, id: u64) -> Result<Comment> {
        let comments = self.list(post_id).await?;
        comments
            .iter()
            .find(|comment| comment.id == id)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(format!("comment {id} not found under post {post_id}"))
            })
    }

    /// Create a comment authored by the configured user.
    pub async fn create(&self, post_id: u64, body: &str) -> Result<Comment> {
        require_non_empty("Comment body", body)?;
        let created = self.api.create_comment(post_id, &self.user.name, body).await?;
        self.cache.invalidate(QueryKey::Comments(post_id));
        Ok(created)
    }

    /// Update a comment's body.
    pub async fn update(&self, comment: &Comment, body: &str) -> Result<Comment> {
        require_non_empty("Comment body", body)?;
        let updated = self
            .api
            .update_comment(comment.id, comment.post_id, &comment.author, body)
            .await?;
        self.cache.invalidate(QueryKey::Comments(comment.post_id));
        Ok(updated)
    }

    /// Delete a comment and refresh its post's comment list.
    pub async fn delete(&self, comment: &Comment) -> Result<()> {
        self.api.delete_comment(comment.id).await?;
        self.cache.invalidate(QueryKey::Comments(comment.post_id));
        Ok(())
    }
}
