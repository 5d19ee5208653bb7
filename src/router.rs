// src/router.rs

//! Client-side routing.
//!
//! Maps URL paths onto views and threads path parameters into their
//! loaders. A route's loader must settle before anything renders;
//! loader failures abort the navigation entirely.

use crate::error::{AppError, Result};
use crate::services::{CommentService, PostService, TopicService};
use crate::utils::log;
use crate::views::{PostDetailView, TopicDetailView, TopicListView};

/// The paths owned by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` landing page
    Home,
    /// `/explore_topics` topic listing
    ExploreTopics,
    /// `/t/{topic}` topic detail
    Topic { topic: String },
    /// `/t/{topic}/createpost` post creation form
    CreatePost { topic: String },
    /// `/t/{topic}/p/{post}` post detail
    Post { topic: String, post: u64 },
}

impl Route {
    /// Parse a client path into a route.
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["explore_topics"] => Ok(Route::ExploreTopics),
            ["t", topic] => Ok(Route::Topic {
                topic: (*topic).to_string(),
            }),
            ["t", topic, "createpost"] => Ok(Route::CreatePost {
                topic: (*topic).to_string(),
            }),
            ["t", topic, "p", post] => {
                let post = post
                    .parse()
                    .map_err(|_| AppError::validation(format!("invalid post id: {post}")))?;
                Ok(Route::Post {
                    topic: (*topic).to_string(),
                    post,
                })
            }
            _ => Err(AppError::validation(format!("unknown path: {path}"))),
        }
    }
}

/// Resolves routes and drives their views.
pub struct Router {
    topics: TopicService,
    posts: PostService,
    comments: CommentService,
}

impl Router {
    pub fn new(topics: TopicService, posts: PostService, comments: CommentService) -> Self {
        Self {
            topics,
            posts,
            comments,
        }
    }

    /// Resolve a path, run its loader, and render the view.
    pub async fn open(&self, path: &str) -> Result<()> {
        match Route::parse(path)? {
            Route::Home => {
                log::header("forum");
                log::sub_item("Open /explore_topics to browse topics");
            }
            Route::ExploreTopics => {
                let mut view = TopicListView::new();
                view.load(&self.topics).await?;
                view.render();
            }
            Route::Topic { topic } => {
                let mut view = TopicDetailView::load(&self.topics, &topic).await?;
                if let Err(e) = view.load_posts(&self.posts).await {
                    log::warn(&format!("Failed to fetch posts for {topic}: {e}"));
                }
                view.render();
            }
            Route::CreatePost { topic } => {
                log::header(&format!("Create New Post on {topic}"));
                log::sub_item("Fields: title, body");
                log::sub_item(&format!("Submit with: forum post create {topic} <title> --body <body>"));
            }
            Route::Post { topic, post } => {
                let mut view = PostDetailView::load(&self.posts, post).await?;
                if view.post.topic != topic {
                    return Err(AppError::not_found(format!(
                        "post {post} does not belong to topic {topic}"
                    )));
                }
                if let Err(e) = view.load_comments(&self.comments).await {
                    log::warn(&format!("Failed to fetch comments for post {post}: {e}"));
                }
                view.render();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_home() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
    }

    #[test]
    fn parses_explore_topics() {
        assert_eq!(
            Route::parse("/explore_topics").unwrap(),
            Route::ExploreTopics
        );
    }

    #[test]
    fn parses_topic_detail() {
        assert_eq!(
            Route::parse("/t/cooking").unwrap(),
            Route::Topic {
                topic: "cooking".into()
            }
        );
    }

    #[test]
    fn parses_create_post() {
        assert_eq!(
            Route::parse("/t/cooking/createpost").unwrap(),
            Route::CreatePost {
                topic: "cooking".into()
            }
        );
    }

    #[test]
    fn parses_post_detail() {
        assert_eq!(
            Route::parse("/t/cooking/p/42").unwrap(),
            Route::Post {
                topic: "cooking".into(),
                post: 42
            }
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(
            Route::parse("/t/cooking/").unwrap(),
            Route::Topic {
                topic: "cooking".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_paths() {
        assert!(Route::parse("/nope/at/all").is_err());
        assert!(Route::parse("/t/cooking/x").is_err());
    }

    #[test]
    fn rejects_non_numeric_post_id() {
        assert!(Route::parse("/t/cooking/p/pasta").is_err());
    }
}
