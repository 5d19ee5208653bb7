// src/cache/mod.rs

//! Keyed query cache with request de-duplication and invalidation.
//!
//! One `QueryCache` instance is created per application session and
//! injected into services and views; there is no ambient global
//! state. Each key maps to the most recent successful fetch result
//! plus a generation counter. Invalidation bumps the generation and
//! notifies subscribers; a load that started under an older
//! generation never installs its result, so a slow superseded
//! response cannot overwrite a fresher one.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, broadcast};

use crate::error::Result;

/// Identifies one cached collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The topic list
    Topics,
    /// Posts under the named topic
    Posts(String),
    /// Comments under the identified post
    Comments(u64),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Topics => write!(f, "topics"),
            QueryKey::Posts(topic) => write!(f, "posts:{topic}"),
            QueryKey::Comments(post_id) => write!(f, "comments:{post_id}"),
        }
    }
}

type CachedValue = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Entry {
    data: Option<CachedValue>,
    stale: bool,
    /// Bumped on invalidation; a load only lands if unchanged since it began.
    generation: u64,
    /// Serializes loads for this key so concurrent fetches share one request.
    load_lock: Arc<AsyncMutex<()>>,
}

/// Process-lifetime cache of fetched collections.
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    events: broadcast::Sender<QueryKey>,
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            entries: Mutex::new(HashMap::new()),
            events,
        }
    }

    /// Subscribe to invalidation events. Views listen on this channel
    /// and re-enter their loading state when their key is announced.
    pub fn subscribe(&self) -> broadcast::Receiver<QueryKey> {
        self.events.subscribe()
    }

    /// Return the cached collection for `key`, or run `loader` to
    /// produce it. Concurrent callers for the same key while a load
    /// is in flight wait on the in-flight request instead of issuing
    /// their own; exactly one loader runs.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.fresh(&key) {
            return Ok(hit);
        }

        let load_lock = {
            let mut entries = self.lock_entries();
            Arc::clone(&entries.entry(key.clone()).or_default().load_lock)
        };

        let _guard = load_lock.lock().await;

        // A concurrent caller may have finished the load while we waited.
        if let Some(hit) = self.fresh(&key) {
            return Ok(hit);
        }

        // Snapshot the generation only once the lock is held: an
        // invalidation that happened while we queued is already
        // accounted for, so this load's result is still installable.
        let generation = {
            let mut entries = self.lock_entries();
            entries.entry(key.clone()).or_default().generation
        };

        let loaded = Arc::new(loader().await?);

        let mut entries = self.lock_entries();
        let entry = entries.entry(key.clone()).or_default();
        if entry.generation == generation {
            entry.data = Some(loaded.clone() as CachedValue);
            entry.stale = false;
        }
        // Otherwise the key was invalidated mid-flight: the caller
        // keeps the result it asked for, but the cache stays stale so
        // the next fetch reloads.
        Ok(loaded)
    }

    /// Mark one key stale and notify subscribers.
    pub fn invalidate(&self, key: QueryKey) {
        self.invalidate_all(std::slice::from_ref(&key));
    }

    /// Mark several keys stale under a single lock, then notify.
    /// Readers never observe a partially applied cascade.
    pub fn invalidate_all(&self, keys: &[QueryKey]) {
        {
            let mut entries = self.lock_entries();
            for key in keys {
                Self::mark_stale(&mut entries, key);
            }
        }
        for key in keys {
            let _ = self.events.send(key.clone());
        }
    }

    /// Invalidation cascade for a deleted post: the owning topic's
    /// post list plus that post's comments.
    pub fn invalidate_post_cascade(&self, topic: &str, post_id: u64) {
        self.invalidate_all(&[
            QueryKey::Posts(topic.to_string()),
            QueryKey::Comments(post_id),
        ]);
    }

    /// Invalidation cascade for a deleted topic: the topic list, the
    /// topic's posts, and every cached comment collection. Which
    /// comment keys belonged to the topic's posts is unknowable
    /// client-side once the posts are gone, so all of them go stale.
    pub fn invalidate_topic_cascade(&self, topic: &str) {
        let mut keys = vec![QueryKey::Topics, QueryKey::Posts(topic.to_string())];
        {
            let mut entries = self.lock_entries();
            let comment_keys: Vec<QueryKey> = entries
                .keys()
                .filter(|key| matches!(key, QueryKey::Comments(_)))
                .cloned()
                .collect();
            for key in keys.iter().chain(comment_keys.iter()) {
                Self::mark_stale(&mut entries, key);
            }
            keys.extend(comment_keys);
        }
        for key in keys {
            let _ = self.events.send(key);
        }
    }

    fn mark_stale(entries: &mut HashMap<QueryKey, Entry>, key: &QueryKey) {
        let entry = entries.entry(key.clone()).or_default();
        entry.stale = true;
        entry.generation += 1;
    }

    fn fresh<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.lock_entries();
        let entry = entries.get(key)?;
        if entry.stale {
            return None;
        }
        entry.data.as_ref().and_then(|data| Arc::clone(data).downcast::<T>().ok())
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().expect("cache lock poisoned")
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::AppError;

    fn counting_loader(
        calls: &Arc<AtomicUsize>,
        items: Vec<String>,
    ) -> impl Future<Output = Result<Vec<String>>> {
        let calls = Arc::clone(calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(items)
        }
    }

    #[tokio::test]
    async fn second_fetch_hits_cache() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache
            .fetch(QueryKey::Topics, || counting_loader(&calls, vec!["a".into()]))
            .await
            .unwrap();
        let second = cache
            .fetch(QueryKey::Topics, || counting_loader(&calls, vec!["b".into()]))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_request() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let slow = |tag: &'static str| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                Ok(vec![tag.to_string()])
            }
        };

        let (a, b) = tokio::join!(
            cache.fetch(QueryKey::Topics, || slow("first")),
            cache.fetch(QueryKey::Topics, || slow("second")),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[tokio::test]
    async fn distinct_keys_do_not_share() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .fetch(QueryKey::Posts("cooking".into()), || {
                counting_loader(&calls, vec![])
            })
            .await
            .unwrap();
        cache
            .fetch(QueryKey::Posts("gaming".into()), || {
                counting_loader(&calls, vec![])
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_reload_and_notifies() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut events = cache.subscribe();

        cache
            .fetch(QueryKey::Topics, || counting_loader(&calls, vec!["a".into()]))
            .await
            .unwrap();
        cache.invalidate(QueryKey::Topics);

        assert_eq!(events.recv().await.unwrap(), QueryKey::Topics);

        let reloaded = cache
            .fetch(QueryKey::Topics, || counting_loader(&calls, vec!["b".into()]))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(reloaded[0], "b");
    }

    #[tokio::test]
    async fn failed_load_leaves_cache_untouched() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let result = cache
            .fetch::<Vec<String>, _, _>(QueryKey::Topics, || async {
                Err(AppError::transport("connection refused"))
            })
            .await;
        assert!(result.is_err());

        // The failure was not cached; the next fetch runs its loader.
        let items = cache
            .fetch(QueryKey::Topics, || counting_loader(&calls, vec!["a".into()]))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(items[0], "a");
    }

    #[tokio::test]
    async fn superseded_load_does_not_install() {
        let cache = Arc::new(QueryCache::new());
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        let pending = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .fetch(QueryKey::Topics, move || async move {
                        gate.await.ok();
                        Ok(vec!["stale".to_string()])
                    })
                    .await
            })
        };

        // Let the load start, then invalidate while it is in flight.
        tokio::task::yield_now().await;
        cache.invalidate(QueryKey::Topics);
        release.send(()).unwrap();

        // The superseded caller still receives the result it asked for.
        let stale = pending.await.unwrap().unwrap();
        assert_eq!(stale[0], "stale");

        // But it must not have been installed: the next fetch reloads.
        let calls = Arc::new(AtomicUsize::new(0));
        let fresh = cache
            .fetch(QueryKey::Topics, || {
                counting_loader(&calls, vec!["fresh".into()])
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fresh[0], "fresh");
    }

    #[tokio::test]
    async fn load_queued_behind_invalidation_still_installs() {
        let cache = Arc::new(QueryCache::new());
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        // First load holds the key's lock until released.
        let first = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .fetch(QueryKey::Topics, move || async move {
                        gate.await.ok();
                        Ok(vec!["stale".to_string()])
                    })
                    .await
            })
        };
        tokio::task::yield_now().await;

        // Invalidate while the first load is in flight, then queue a
        // second fetch behind it.
        cache.invalidate(QueryKey::Topics);
        let second = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .fetch(QueryKey::Topics, || async { Ok(vec!["fresh".to_string()]) })
                    .await
            })
        };
        tokio::task::yield_now().await;
        release.send(()).unwrap();

        assert_eq!(first.await.unwrap().unwrap()[0], "stale");
        assert_eq!(second.await.unwrap().unwrap()[0], "fresh");

        // The second load began after the invalidation, so its result
        // was cached: the next fetch must not hit the network again.
        let calls = Arc::new(AtomicUsize::new(0));
        let hit = cache
            .fetch(QueryKey::Topics, || {
                counting_loader(&calls, vec!["reload".into()])
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(hit[0], "fresh");
    }

    #[tokio::test]
    async fn post_cascade_invalidates_posts_and_comments() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for key in [
            QueryKey::Topics,
            QueryKey::Posts("cooking".into()),
            QueryKey::Comments(7),
        ] {
            cache
                .fetch(key, || counting_loader(&calls, vec![]))
                .await
                .unwrap();
        }

        cache.invalidate_post_cascade("cooking", 7);

        for key in [QueryKey::Posts("cooking".into()), QueryKey::Comments(7)] {
            cache
                .fetch(key, || counting_loader(&calls, vec![]))
                .await
                .unwrap();
        }
        cache
            .fetch(QueryKey::Topics, || counting_loader(&calls, vec![]))
            .await
            .unwrap();

        // Three initial loads, two reloads; topics stayed fresh.
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn topic_cascade_invalidates_every_comment_key() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for key in [
            QueryKey::Topics,
            QueryKey::Posts("cooking".into()),
            QueryKey::Comments(1),
            QueryKey::Comments(2),
        ] {
            cache
                .fetch(key, || counting_loader(&calls, vec![]))
                .await
                .unwrap();
        }

        cache.invalidate_topic_cascade("cooking");

        for key in [
            QueryKey::Topics,
            QueryKey::Posts("cooking".into()),
            QueryKey::Comments(1),
            QueryKey::Comments(2),
        ] {
            cache
                .fetch(key, || counting_loader(&calls, vec![]))
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn key_display_is_stable() {
        assert_eq!(QueryKey::Topics.to_string(), "topics");
        assert_eq!(QueryKey::Posts("cooking".into()).to_string(), "posts:cooking");
        assert_eq!(QueryKey::Comments(3).to_string(), "comments:3");
    }
}
