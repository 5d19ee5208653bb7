// src/views/mod.rs

//! Terminal views: list and detail rendering, forms, confirmation.

mod detail;
mod dialog;
mod forms;
mod list;

pub use detail::{PostDetailView, TopicDetailView};
pub use dialog::ConfirmDelete;
pub use forms::{CommentForm, PostForm, TopicForm};
pub use list::{ListState, TopicListView};
