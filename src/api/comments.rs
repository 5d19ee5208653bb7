// src/api/comments.rs

//! Comment endpoints.

use serde_json::json;

use super::ApiClient;
use crate::error::Result;
use crate::models::Comment;

impl ApiClient {
    /// Fetch every comment attached to a post.
    pub async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>> {
        let value = self.get(&format!("posts/{post_id}/comments")).await?;
        Self::decode_list(value)
    }

    /// Create a comment and return it with its new id.
    pub async fn create_comment(&self, post_id: u64, author: &str, body: &str) -> Result<Comment> {
        let payload = json!({
            "post_id": post_id,
            "user_name": author,
            "body": body,
        });
        let value = self.post("comments", &payload).await?;
        Self::decode(value)
    }

    /// Update a comment's body, keyed by id.
    pub async fn update_comment(&self, id: u64, post_id: u64, author: &str, body: &str) -> Result<Comment> {
        let payload = json!({
            "ID": id,
            "post_id": post_id,
            "user_name": author,
            "body": body,
        });
        let value = self.patch(&format!("comments/{id}"), &payload).await?;
        Self::decode(value)
    }

    /// Delete a comment by id.
    pub async fn delete_comment(&self, id: u64) -> Result<()> {
        self.delete(&format!("comments/{id}")).await?;
        Ok(())
    }
}
