// src/api/posts.rs

//! Post endpoints.

use serde_json::json;

use super::ApiClient;
use crate::error::Result;
use crate::models::Post;

impl ApiClient {
    /// Fetch every post under a topic.
    pub async fn list_posts(&self, topic: &str) -> Result<Vec<Post>> {
        let value = self.get(&format!("topics/{topic}/posts")).await?;
        Self::decode_list(value)
    }

    /// Fetch a single post by its server-assigned id.
    pub async fn get_post(&self, id: u64) -> Result<Post> {
        let value = self.get(&format!("posts/{id}")).await?;
        Self::decode(value)
    }

    /// Create a post under a topic and return it with its new id.
    pub async fn create_post(
        &self,
        topic: &str,
        title: &str,
        author: &str,
        body: &str,
    ) -> Result<Post> {
        let payload = json!({
            "topic_title": topic,
            "title": title,
            "user_name": author,
            "body": body,
        });
        let value = self.post(&format!("topics/{topic}/posts"), &payload).await?;
        Self::decode(value)
    }

    /// Update a post's title and body, keyed by id.
    pub async fn update_post(&self, id: u64, title: &str, body: &str) -> Result<Post> {
        let payload = json!({
            "title": title,
            "body": body,
        });
        let value = self.patch(&format!("posts/{id}"), &payload).await?;
        Self::decode(value)
    }

    /// Delete a post by id.
    pub async fn delete_post(&self, id: u64) -> Result<()> {
        self.delete(&format!("posts/{id}")).await?;
        Ok(())
    }
}
