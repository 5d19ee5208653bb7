// src/views/forms.rs

//! Mutation forms.
//!
//! A form owns the user's input and survives a failed submission
//! unchanged: the entered values stay put and the error is recorded
//! on the form, so the user can edit and retry. Validation runs
//! before any network call.

use crate::error::Result;
use crate::models::{Comment, Post, Topic};
use crate::services::{CommentService, PostService, TopicService, validate_topic_name};

/// Record the outcome of a submission on the form's error slot. The
/// fields themselves are never touched, so a failed submission keeps
/// the user's input intact.
fn settle<T>(error: &mut Option<String>, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            *error = None;
            Ok(value)
        }
        Err(e) => {
            *error = Some(e.to_string());
            Err(e)
        }
    }
}

/// Create/edit form for a topic.
#[derive(Debug, Clone)]
pub struct TopicForm {
    pub name: String,
    pub description: String,
    /// Identity of the topic being edited; `None` for a create.
    original: Option<String>,
    /// Message from the last failed submission, if any.
    pub error: Option<String>,
}

impl TopicForm {
    /// Empty create form.
    pub fn create() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            original: None,
            error: None,
        }
    }

    /// Edit form pre-populated from an existing topic.
    pub fn edit(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
            description: topic.description.clone(),
            original: Some(topic.name.clone()),
            error: None,
        }
    }

    /// Client-side checks, shown before any request is sent.
    pub fn validate(&self) -> Result<()> {
        validate_topic_name(&self.name)
    }

    /// Submit the form. On failure the fields are left as entered.
    pub async fn submit(&mut self, topics: &TopicService) -> Result<Topic> {
        let result = match &self.original {
            None => topics.create(&self.name, &self.description).await,
            Some(original) => topics.update(original, &self.name, &self.description).await,
        };
        settle(&mut self.error, result)
    }
}

/// Create/edit form for a post.
#[derive(Debug, Clone)]
pub struct PostForm {
    pub topic: String,
    pub title: String,
    pub body: String,
    /// Id of the post being edited; `None` for a create.
    original: Option<u64>,
    pub error: Option<String>,
}

impl PostForm {
    /// Empty create form for the given topic.
    pub fn create(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            title: String::new(),
            body: String::new(),
            original: None,
            error: None,
        }
    }

    /// Edit form pre-populated from an existing post.
    pub fn edit(post: &Post) -> Self {
        Self {
            topic: post.topic.clone(),
            title: post.title.clone(),
            body: post.body.clone(),
            original: Some(post.id),
            error: None,
        }
    }

    /// Submit the form. On failure the fields are left as entered.
    pub async fn submit(&mut self, posts: &PostService) -> Result<Post> {
        let result = match self.original {
            None => posts.create(&self.topic, &self.title, &self.body).await,
            Some(id) => posts.update(id, &self.title, &self.body).await,
        };
        settle(&mut self.error, result)
    }
}

/// Create/edit form for a comment.
#[derive(Debug, Clone)]
pub struct CommentForm {
    pub post_id: u64,
    pub body: String,
    /// The comment being edited; `None` for a create.
    original: Option<Comment>,
    pub error: Option<String>,
}

impl CommentForm {
    /// Empty create form for the given post.
    pub fn create(post_id: u64) -> Self {
        Self {
            post_id,
            body: String::new(),
            original: None,
            error: None,
        }
    }

    /// Edit form pre-populated from an existing comment.
    pub fn edit(comment: &Comment) -> Self {
        Self {
            post_id: comment.post_id,
            body: comment.body.clone(),
            original: Some(comment.clone()),
            error: None,
        }
    }

    /// Submit the form. On failure the body is left as entered.
    pub async fn submit(&mut self, comments: &CommentService) -> Result<Comment> {
        let result = match &self.original {
            None => comments.create(self.post_id, &self.body).await,
            Some(original) => comments.update(original, &self.body).await,
        };
        settle(&mut self.error, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn topic_form_validation_blocks_whitespace_name() {
        let mut form = TopicForm::create();
        form.name = "my topic".to_string();
        form.description = "spaces everywhere".to_string();

        assert!(form.validate().is_err());
        // Input is still there for the user to fix.
        assert_eq!(form.name, "my topic");
        assert_eq!(form.description, "spaces everywhere");
    }

    #[test]
    fn topic_form_validation_accepts_hyphenated_name() {
        let mut form = TopicForm::create();
        form.name = "my-topic".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn edit_forms_are_prepopulated() {
        let topic = Topic::new("cooking", "recipes");
        let form = TopicForm::edit(&topic);
        assert_eq!(form.name, "cooking");
        assert_eq!(form.description, "recipes");
        assert!(form.error.is_none());
    }

    #[test]
    fn failed_topic_submission_keeps_input_and_records_error() {
        let mut form = TopicForm::create();
        form.name = "cooking".to_string();
        form.description = "recipes".to_string();

        let result: Result<Topic> = settle(
            &mut form.error,
            Err(AppError::request_failed(400, "name taken")),
        );

        assert!(result.is_err());
        assert_eq!(form.error.as_deref(), Some("Request failed (400): name taken"));
        // The user's input survives for a retry.
        assert_eq!(form.name, "cooking");
        assert_eq!(form.description, "recipes");
    }

    #[test]
    fn failed_post_submission_keeps_input_and_records_error() {
        let mut form = PostForm::create("cooking");
        form.title = "Pasta".to_string();
        form.body = "al dente".to_string();

        let result: Result<Post> = settle(
            &mut form.error,
            Err(AppError::transport("connection refused")),
        );

        assert!(result.is_err());
        assert!(form.error.is_some());
        assert_eq!(form.title, "Pasta");
        assert_eq!(form.body, "al dente");
    }

    #[test]
    fn failed_comment_submission_keeps_input_and_records_error() {
        let mut form = CommentForm::create(7);
        form.body = "nice recipe".to_string();

        let result: Result<Comment> = settle(
            &mut form.error,
            Err(AppError::request_failed(500, "db down")),
        );

        assert!(result.is_err());
        assert!(form.error.is_some());
        assert_eq!(form.body, "nice recipe");
    }

    #[test]
    fn successful_submission_clears_a_previous_error() {
        let mut form = TopicForm::create();
        form.name = "cooking".to_string();
        form.error = Some("Request failed (400): name taken".to_string());

        let result = settle(&mut form.error, Ok(Topic::new("cooking", "recipes")));

        assert!(result.is_ok());
        assert!(form.error.is_none());
    }
}
