// src/api/topics.rs

//! Topic endpoints.

use serde_json::json;

use super::ApiClient;
use crate::error::Result;
use crate::models::Topic;

impl ApiClient {
    /// Fetch every topic.
    pub async fn list_topics(&self) -> Result<Vec<Topic>> {
        let value = self.get("topics").await?;
        Self::decode_list(value)
    }

    /// Fetch a single topic by name.
    pub async fn get_topic(&self, name: &str) -> Result<Topic> {
        let value = self.get(&format!("topics/{name}")).await?;
        Self::decode(value)
    }

    /// Create a topic and return the stored entity.
    pub async fn create_topic(&self, name: &str, description: &str) -> Result<Topic> {
        let body = json!({
            "topic_name": name,
            "description": description,
        });
        let value = self.post("topics", &body).await?;
        Self::decode(value)
    }

    /// Update a topic keyed by its current name.
    pub async fn update_topic(&self, name: &str, new_name: &str, description: &str) -> Result<Topic> {
        let body = json!({
            "topic_name": new_name,
            "description": description,
        });
        let value = self.patch(&format!("topics/{name}"), &body).await?;
        Self::decode(value)
    }

    /// Delete a topic by name.
    pub async fn delete_topic(&self, name: &str) -> Result<()> {
        self.delete(&format!("topics/{name}")).await?;
        Ok(())
    }
}
