// src/main.rs

//! forum: command-line client for the topics/posts/comments backend.
//!
//! Every subcommand maps onto the same route/view/service plumbing
//! the library exposes; `open` takes the client paths directly.

mod api;
mod cache;
mod error;
mod models;
mod router;
mod services;
mod utils;
mod views;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::cache::QueryCache;
use crate::error::Result;
use crate::models::Config;
use crate::router::Router;
use crate::services::{CommentService, PostService, TopicService};
use crate::utils::log;
use crate::views::{CommentForm, ConfirmDelete, PostDetailView, PostForm, TopicForm, TopicListView};

#[derive(Parser, Debug)]
#[command(
    name = "forum",
    version = "1.0.0",
    about = "Command-line client for the discussion forum"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Open a client path (e.g. /explore_topics, /t/cooking) and render its view
    Open { path: String },
    /// Topic operations
    Topic {
        #[command(subcommand)]
        action: TopicAction,
    },
    /// Post operations
    Post {
        #[command(subcommand)]
        action: PostAction,
    },
    /// Comment operations
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },
}

#[derive(Subcommand, Debug)]
enum TopicAction {
    /// List all topics
    List,
    /// Create a topic
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Edit a topic's name or description
    Edit {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a topic
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PostAction {
    /// List the posts under a topic
    List { topic: String },
    /// Read a post and its comments
    Read { id: u64 },
    /// Create a post under a topic
    Create {
        topic: String,
        title: String,
        #[arg(short, long, default_value = "")]
        body: String,
    },
    /// Edit a post's title or body
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Delete a post
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CommentAction {
    /// List the comments under a post
    List { post: u64 },
    /// Comment on a post
    Create { post: u64, body: String },
    /// Edit a comment's body
    Edit { post: u64, id: u64, body: String },
    /// Delete a comment
    Delete {
        post: u64,
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Shared handles for all command handlers.
struct App {
    topics: TopicService,
    posts: PostService,
    comments: CommentService,
    router: Router,
}

/// Main entry point
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    env_logger::init();

    let mut config = Config::load_or_default(&cli.config);
    if cli.quiet {
        config.output.level = "error".to_string();
    }
    log::init(&config.output.level);

    if let Err(e) = run(cli, &config).await {
        log::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &Config) -> Result<()> {
    config.validate()?;

    let api = Arc::new(ApiClient::new(config)?);
    let cache = Arc::new(QueryCache::new());

    let topics = TopicService::new(Arc::clone(&api), Arc::clone(&cache));
    let posts = PostService::new(Arc::clone(&api), Arc::clone(&cache), config.user.clone());
    let comments = CommentService::new(Arc::clone(&api), Arc::clone(&cache), config.user.clone());
    let router = Router::new(topics.clone(), posts.clone(), comments.clone());

    let app = App {
        topics,
        posts,
        comments,
        router,
    };

    match cli.command {
        Command::Open { path } => app.router.open(&path).await,
        Command::Topic { action } => run_topic(&app, action).await,
        Command::Post { action } => run_post(&app, action).await,
        Command::Comment { action } => run_comment(&app, action).await,
    }
}

async fn run_topic(app: &App, action: TopicAction) -> Result<()> {
    match action {
        TopicAction::List => {
            let mut view = TopicListView::new();
            view.load(&app.topics).await?;
            view.render();
        }
        TopicAction::Create { name, description } => {
            let mut form = TopicForm::create();
            form.name = name;
            form.description = description;
            form.validate()?;
            let topic = form.submit(&app.topics).await?;
            log::success(&format!("Created topic {}", topic.name));
        }
        TopicAction::Edit {
            name,
            rename,
            description,
        } => {
            let existing = app.topics.get(&name).await?;
            let mut form = TopicForm::edit(&existing);
            if let Some(rename) = rename {
                form.name = rename;
            }
            if let Some(description) = description {
                form.description = description;
            }
            form.validate()?;
            let topic = form.submit(&app.topics).await?;
            log::success(&format!("Updated topic {}", topic.name));
        }
        TopicAction::Delete { name, yes } => {
            let topic = app.topics.get(&name).await?;
            let dialog = ConfirmDelete::new(topic, name.clone());
            if !confirmed(&dialog.prompt("topic"), yes)? {
                dialog.cancel();
                log::info("Cancelled");
                return Ok(());
            }
            let topic = dialog.confirm();
            app.topics.delete(&topic.name).await?;
            log::success(&format!("Deleted topic {name}"));
        }
    }
    Ok(())
}

async fn run_post(app: &App, action: PostAction) -> Result<()> {
    match action {
        PostAction::List { topic } => app.router.open(&format!("/t/{topic}")).await?,
        PostAction::Read { id } => {
            let mut view = PostDetailView::load(&app.posts, id).await?;
            if let Err(e) = view.load_comments(&app.comments).await {
                log::warn(&format!("Failed to fetch comments for post {id}: {e}"));
            }
            view.render();
        }
        PostAction::Create { topic, title, body } => {
            let mut form = PostForm::create(&topic);
            form.title = title;
            form.body = body;
            let post = form.submit(&app.posts).await?;
            log::success(&format!("Created post #{} on {}", post.id, post.topic));
            // Original flow: navigate back to the topic page on success.
            app.router.open(&format!("/t/{topic}")).await?;
        }
        PostAction::Edit { id, title, body } => {
            let existing = app.posts.get(id).await?;
            let mut form = PostForm::edit(&existing);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(body) = body {
                form.body = body;
            }
            let post = form.submit(&app.posts).await?;
            log::success(&format!("Updated post #{}", post.id));
        }
        PostAction::Delete { id, yes } => {
            let post = app.posts.get(id).await?;
            let label = format!("{} and all its comments", post.title);
            let dialog = ConfirmDelete::new(post, label);
            if !confirmed(&dialog.prompt("post"), yes)? {
                dialog.cancel();
                log::info("Cancelled");
                return Ok(());
            }
            let post = dialog.confirm();
            app.posts.delete(&post).await?;
            log::success(&format!("Deleted post #{id}"));
        }
    }
    Ok(())
}

async fn run_comment(app: &App, action: CommentAction) -> Result<()> {
    match action {
        CommentAction::List { post } => {
            let mut view = PostDetailView::load(&app.posts, post).await?;
            view.load_comments(&app.comments).await?;
            view.render();
        }
        CommentAction::Create { post, body } => {
            let mut form = CommentForm::create(post);
            form.body = body;
            let comment = form.submit(&app.comments).await?;
            log::success(&format!("Created comment #{}", comment.id));
        }
        CommentAction::Edit { post, id, body } => {
            let existing = app.comments.find(post, id).await?;
            let mut form = CommentForm::edit(&existing);
            form.body = body;
            let comment = form.submit(&app.comments).await?;
            log::success(&format!("Updated comment #{}", comment.id));
        }
        CommentAction::Delete { post, id, yes } => {
            let comment = app.comments.find(post, id).await?;
            let dialog = ConfirmDelete::new(comment, format!("comment #{id}"));
            if !confirmed(&dialog.prompt("comment"), yes)? {
                dialog.cancel();
                log::info("Cancelled");
                return Ok(());
            }
            let comment = dialog.confirm();
            app.comments.delete(&comment).await?;
            log::success(&format!("Deleted comment #{id}"));
        }
    }
    Ok(())
}

/// Ask the user to confirm a destructive action.
fn confirmed(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
