//! In-memory post store for development and tests.
//!
//! Mirrors the backend's observable behavior: creates assign an id,
//! every mutation pushes the entire collection, freshly sorted, to all
//! live subscriptions. ULIDs stand in for the backend's push keys
//! (both are time-ordered and coordination-free).

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};

use crate::domain::post::sort_newest_first;
use crate::domain::{Post, PostId, PostRecord, StoreError};
use crate::ports::{
    IdGenerator, PostStore, Subscription, SubscriptionHandle, SystemClock, UlidGenerator,
};

pub struct InMemoryPostStore {
    posts: Mutex<Vec<Post>>,
    sender: watch::Sender<Vec<Post>>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::with_id_generator(UlidGenerator::new(SystemClock))
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        let (sender, _receiver) = watch::channel(Vec::new());
        Self {
            posts: Mutex::new(Vec::new()),
            sender,
            ids: Box::new(ids),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn subscribe(&self) -> Subscription {
        let mut source = self.sender.subscribe();
        // The subscriber sees the current collection immediately.
        let initial = source.borrow_and_update().clone();
        let (tx, rx) = watch::channel(initial);

        // Relay task: forwards store pushes into this subscription's own
        // channel. Aborting it is what makes unsubscribe final - no
        // further pushes can reach the receiver afterwards.
        let task = tokio::spawn(async move {
            while source.changed().await.is_ok() {
                let snapshot = source.borrow_and_update().clone();
                if tx.send(snapshot).is_err() {
                    break;
                }
            }
        });

        Subscription::live(rx, SubscriptionHandle::for_task(task))
    }

    async fn create(&self, record: PostRecord) -> Result<PostId, StoreError> {
        let id = self.ids.next_post_id();
        let post = Post::from_record(id.clone(), record);

        let mut posts = self.posts.lock().await;
        posts.push(post);
        // Stable sort: equal timestamps keep insertion order.
        sort_newest_first(&mut posts);

        // send_replace: a store nobody subscribes to must still accept writes.
        self.sender.send_replace(posts.clone());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::app::PostRepository;
    use crate::domain::{Category, CategoryFilter};
    use crate::ports::FeedState;

    fn record(title: &str, category: Category, timestamp: i64) -> PostRecord {
        PostRecord {
            title: title.to_string(),
            category,
            image_url: "https://img/x.png".to_string(),
            content: "<p>body</p>".to_string(),
            excerpt: "body".to_string(),
            timestamp,
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = InMemoryPostStore::new();
        let a = store.create(record("a", Category::News, 1)).await.unwrap();
        let b = store.create(record("b", Category::News, 2)).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn pushes_arrive_sorted_newest_first() {
        let store = InMemoryPostStore::new();

        // Timestamps [100, 300, 200], categories [News, Fashion, News].
        store.create(record("a", Category::News, 100)).await.unwrap();
        store.create(record("b", Category::Fashion, 300)).await.unwrap();
        store.create(record("c", Category::News, 200)).await.unwrap();

        let subscription = store.subscribe().await;
        assert_eq!(subscription.state(), FeedState::Live);
        let (repository, _handle) = PostRepository::attach(subscription);

        let all = repository.all();
        let timestamps: Vec<i64> = all.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![300, 200, 100]);
        assert_eq!(all[0].category, Category::Fashion);

        let news = repository.filtered_by(CategoryFilter::Only(Category::News));
        let news_timestamps: Vec<i64> = news.iter().map(|p| p.timestamp).collect();
        assert_eq!(news_timestamps, vec![200, 100]);
    }

    #[tokio::test]
    async fn subscriber_observes_a_create_made_after_subscribing() {
        let store = InMemoryPostStore::new();
        let (mut repository, _handle) = PostRepository::attach(store.subscribe().await);
        assert!(repository.all().is_empty());

        store.create(record("a", Category::Video, 50)).await.unwrap();

        assert!(repository.changed().await);
        assert_eq!(repository.all()[0].title, "a");
    }

    #[tokio::test]
    async fn equal_timestamps_keep_creation_order() {
        let store = InMemoryPostStore::new();
        store.create(record("first", Category::News, 100)).await.unwrap();
        store.create(record("second", Category::News, 100)).await.unwrap();
        store.create(record("newer", Category::News, 200)).await.unwrap();

        let (repository, _handle) = PostRepository::attach(store.subscribe().await);
        let titles: Vec<String> = repository.all().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["newer", "first", "second"]);
    }

    #[tokio::test]
    async fn unsubscribe_stops_further_pushes() {
        let store = InMemoryPostStore::new();
        let (mut repository, handle) = PostRepository::attach(store.subscribe().await);

        handle.unsubscribe();
        // Let the aborted relay task wind down.
        tokio::time::sleep(Duration::from_millis(20)).await;

        store.create(record("late", Category::News, 100)).await.unwrap();

        // The relay is gone, so no further push can arrive.
        assert!(!repository.changed().await);
        assert!(repository.all().is_empty());
    }

    #[tokio::test]
    async fn independent_subscriptions_each_get_pushes() {
        let store = InMemoryPostStore::new();
        let (mut repo_a, _handle_a) = PostRepository::attach(store.subscribe().await);
        let (mut repo_b, _handle_b) = PostRepository::attach(store.subscribe().await);

        store.create(record("a", Category::News, 10)).await.unwrap();

        assert!(repo_a.changed().await);
        assert!(repo_b.changed().await);
        assert_eq!(repo_a.all(), repo_b.all());
    }
}
