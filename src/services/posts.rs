// src/services/posts.rs

//! Post reads and mutations.

use std::sync::Arc;

use super::require_non_empty;
use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::error::Result;
use crate::models::{Post, UserConfig};

/// Service for posts under a topic.
#[derive(Clone)]
pub struct PostService {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    user: UserConfig,
}

impl PostService {
    pub fn new(api: Arc<ApiClient>, cache: Arc<QueryCache>, user: UserConfig) -> Self {
        Self { api, cache, user }
    }

    /// Cached post list for a topic.
    pub async fn list(&self, topic: &str) -> Result<Arc<Vec<Post>>> {
        let api = Arc::clone(&self.api);
        let topic_owned = topic.to_string();
        self.cache
            .fetch(QueryKey::Posts(topic.to_string()), move || async move {
                api.list_posts(&topic_owned).await
            })
            .await
    }

    /// Resolve a single post by id, bypassing the cache.
    pub async fn get(&self, id: u64) -> Result<Post> {
        self.api.get_post(id).await
    }

    /// Create a post authored by the configured user.
    pub async fn create(&self, topic: &str, title: &str, body: &str) -> Result<Post> {
        require_non_empty("Title", title)?;
        let created = self
            .api
            .create_post(topic, title, &self.user.name, body)
            .await?;
        self.cache.invalidate(QueryKey::Posts(topic.to_string()));
        Ok(created)
    }

    /// Update a post's title and body.
    pub async fn update(&self, id: u64, title: &str, body: &str) -> Result<Post> {
        require_non_empty("Title", title)?;
        let updated = self.api.update_post(id, title, body).await?;
        self.cache
            .invalidate(QueryKey::Posts(updated.topic.clone()));
        Ok(updated)
    }

    /// Delete a post. Its topic's post list and its own comments go
    /// stale together; the backend is responsible for removing the
    /// orphaned comments themselves.
    pub async fn delete(&self, post: &Post) -> Result<()> {
        self.api.delete_post(post.id).await?;
        self.cache.invalidate_post_cascade(&post.topic, post.id);
        Ok(())
    }
}
