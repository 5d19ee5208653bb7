// src/services/topics.rs

//! Topic reads and mutations.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::error::{AppError, Result};
use crate::models::Topic;

/// Service for the topic collection.
#[derive(Clone)]
pub struct TopicService {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
}

impl TopicService {
    pub fn new(api: Arc<ApiClient>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// Cached topic list.
    pub async fn list(&self) -> Result<Arc<Vec<Topic>>> {
        let api = Arc::clone(&self.api);
        self.cache
            .fetch(QueryKey::Topics, move || async move {
                api.list_topics().await
            })
            .await
    }

    /// Resolve a single topic, bypassing the cache. Used by detail
    /// view loaders, which must reflect the backend's current state.
    pub async fn get(&self, name: &str) -> Result<Topic> {
        self.api.get_topic(name).await
    }

    /// Create a topic and refresh the topic list.
    pub async fn create(&self, name: &str, description: &str) -> Result<Topic> {
        validate_topic_name(name)?;
        let created = self.api.create_topic(name, description).await?;
        self.cache.invalidate(QueryKey::Topics);
        Ok(created)
    }

    /// Update a topic keyed by its current name.
    pub async fn update(&self, name: &str, new_name: &str, description: &str) -> Result<Topic> {
        validate_topic_name(new_name)?;
        let updated = self.api.update_topic(name, new_name, description).await?;
        self.cache.invalidate(QueryKey::Topics);
        Ok(updated)
    }

    /// Delete a topic. The topic list, the topic's posts, and all
    /// cached comments go stale in one atomic cascade.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.api.delete_topic(name).await?;
        self.cache.invalidate_topic_cascade(name);
        Ok(())
    }
}

/// Topic names are identifiers: non-empty and whitespace-free.
pub fn validate_topic_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::validation("Topic name cannot be empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(AppError::validation("Topic name cannot have whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_with_space_is_rejected() {
        assert!(validate_topic_name("my topic").is_err());
    }

    #[test]
    fn hyphenated_name_is_accepted() {
        assert!(validate_topic_name("my-topic").is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_topic_name("").is_err());
    }

    #[test]
    fn tab_and_newline_are_whitespace_too() {
        assert!(validate_topic_name("my\ttopic").is_err());
        assert!(validate_topic_name("my\ntopic").is_err());
    }
}
