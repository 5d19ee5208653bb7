// src/views/detail.rs

//! Detail views: one primary entity plus its child collection.
//!
//! The primary entity is resolved by the route loader before a view
//! exists at all; a loader failure (including not-found) aborts the
//! navigation and no child fetch is attempted. Child collections are
//! fetched afterwards with their own loading state.

use super::list::{ListState, render_list};
use crate::cache::QueryKey;
use crate::error::Result;
use crate::models::{Comment, Post, Topic};
use crate::services::{CommentService, PostService, TopicService};
use crate::utils::log;

/// A topic page: the topic itself and its posts.
pub struct TopicDetailView {
    pub topic: Topic,
    posts: ListState<Post>,
}

impl TopicDetailView {
    /// Route loader: resolve the topic or abort navigation.
    pub async fn load(topics: &TopicService, name: &str) -> Result<Self> {
        let topic = topics.get(name).await?;
        Ok(Self {
            topic,
            posts: ListState::Loading,
        })
    }

    /// Fetch the child post collection through the cache.
    pub async fn load_posts(&mut self, posts: &PostService) -> Result<()> {
        self.posts = ListState::Loaded(posts.list(&self.topic.name).await?);
        Ok(())
    }

    pub fn posts(&self) -> &ListState<Post> {
        &self.posts
    }

    /// React to a cache invalidation event.
    pub fn on_invalidated(&mut self, key: &QueryKey) {
        if matches!(key, QueryKey::Posts(topic) if *topic == self.topic.name) {
            self.posts = ListState::Loading;
        }
    }

    pub fn render(&self) {
        log::header(&format!("topic: {}", self.topic.name));
        log::sub_item(&self.topic.description);
        log::info("Explore Posts");
        render_list(&self.posts, "No posts found", |post: &Post| {
            log::sub_item(&format!("#{} {} (by {})", post.id, post.title, post.author));
        });
    }
}

/// A post page: the post itself and its comments.
pub struct PostDetailView {
    pub post: Post,
    comments: ListState<Comment>,
}

impl PostDetailView {
    /// Route loader: resolve the post or abort navigation.
    pub async fn load(posts: &PostService, id: u64) -> Result<Self> {
        let post = posts.get(id).await?;
        Ok(Self {
            post,
            comments: ListState::Loading,
        })
    }

    /// Fetch the child comment collection through the cache.
    pub async fn load_comments(&mut self, comments: &CommentService) -> Result<()> {
        self.comments = ListState::Loaded(comments.list(self.post.id).await?);
        Ok(())
    }

    pub fn comments(&self) -> &ListState<Comment> {
        &self.comments
    }

    /// React to a cache invalidation event.
    pub fn on_invalidated(&mut self, key: &QueryKey) {
        if *key == QueryKey::Comments(self.post.id) {
            self.comments = ListState::Loading;
        }
    }

    pub fn render(&self) {
        log::header(&self.post.title);
        log::sub_item(&format!("By {}", self.post.author));
        log::sub_item(&self.post.body);
        log::info("Comments");
        render_list(&self.comments, "No comments found", |comment: &Comment| {
            log::sub_item(&format!(
                "#{} {}: {}",
                comment.id, comment.author, comment.body
            ));
        });
    }
}
