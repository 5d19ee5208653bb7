// src/views/list.rs

//! Collection views and their loading state machine.

use std::sync::Arc;

use crate::cache::QueryKey;
use crate::error::Result;
use crate::models::Topic;
use crate::services::TopicService;
use crate::utils::log;

/// State of a fetched collection: `Loading` until the first result
/// lands, then `Loaded` (possibly empty). A view re-enters `Loading`
/// only when its cache key is invalidated, never on re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<T> {
    Loading,
    Loaded(Arc<Vec<T>>),
}

impl<T> ListState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    /// Loaded items, if any have arrived.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            ListState::Loading => None,
            ListState::Loaded(items) => Some(items),
        }
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Loading
    }
}

/// The "Explore Topics" listing.
#[derive(Default)]
pub struct TopicListView {
    state: ListState<Topic>,
}

impl TopicListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListState<Topic> {
        &self.state
    }

    /// Fetch the topic list through the cache.
    pub async fn load(&mut self, topics: &TopicService) -> Result<()> {
        self.state = ListState::Loaded(topics.list().await?);
        Ok(())
    }

    /// React to a cache invalidation event.
    pub fn on_invalidated(&mut self, key: &QueryKey) {
        if *key == QueryKey::Topics {
            self.state = ListState::Loading;
        }
    }

    pub fn render(&self) {
        log::header("Explore Topics");
        render_list(&self.state, "No topics found", |topic: &Topic| {
            log::sub_item(&format!("{}: {}", topic.name, topic.description));
        });
    }
}

/// Shared rendering for the three list states.
pub(super) fn render_list<T>(state: &ListState<T>, empty_message: &str, mut line: impl FnMut(&T)) {
    match state.items() {
        None => log::sub_item("Loading..."),
        Some([]) => log::sub_item(empty_message),
        Some(items) => {
            for item in items {
                line(item);
            }
        }
    }
}
