//! PostRepository - 購読が配信した最新コレクションの読み取り窓口
//!
//! Repository は自分では何も変更しない。変わるのは次の push が来たとき
//! だけで、その push はコレクション全体を置き換える（差分適用はしない）。
//! push が publish の最中に届いても単に見えるコレクションが入れ替わる
//! だけで、in-flight の書き込みとは無関係。

use tokio::sync::watch;

use crate::domain::{CategoryFilter, Post};
use crate::ports::{FeedState, Subscription, SubscriptionHandle};

/// Read-side view over the live post collection.
///
/// Cheap to clone: clones share the same underlying channel, so every
/// clone sees the same latest push.
#[derive(Debug, Clone)]
pub struct PostRepository {
    state: FeedState,
    receiver: watch::Receiver<Vec<Post>>,
}

impl PostRepository {
    /// Consume a subscription, returning the repository and the handle
    /// that terminates the live connection.
    pub fn attach(subscription: Subscription) -> (Self, SubscriptionHandle) {
        let (state, receiver, handle) = subscription.into_parts();
        (Self { state, receiver }, handle)
    }

    pub fn feed_state(&self) -> FeedState {
        self.state
    }

    /// The full collection as last pushed: sorted newest first.
    pub fn all(&self) -> Vec<Post> {
        self.receiver.borrow().clone()
    }

    /// Posts matching the filter, relative order preserved.
    /// `CategoryFilter::Home` returns everything.
    pub fn filtered_by(&self, filter: CategoryFilter) -> Vec<Post> {
        self.receiver
            .borrow()
            .iter()
            .filter(|post| filter.matches(post.category))
            .cloned()
            .collect()
    }

    /// Wait for the next push. Returns false once the subscription has
    /// ended (unsubscribed or store dropped); the last known collection
    /// stays readable either way.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, PostId};
    use crate::ports::Subscription;

    fn post(id: &str, category: Category, timestamp: i64) -> Post {
        Post {
            id: PostId::new(id),
            title: format!("post {id}"),
            category,
            image_url: "https://img/x.png".to_string(),
            content: "<p>body</p>".to_string(),
            excerpt: "body".to_string(),
            timestamp,
        }
    }

    fn repository_with(
        posts: Vec<Post>,
    ) -> (PostRepository, watch::Sender<Vec<Post>>, SubscriptionHandle) {
        let (tx, rx) = watch::channel(posts);
        let (repository, handle) =
            PostRepository::attach(Subscription::live(rx, SubscriptionHandle::noop()));
        (repository, tx, handle)
    }

    #[tokio::test]
    async fn all_returns_the_latest_push() {
        let (repository, tx, _handle) = repository_with(vec![post("a", Category::News, 300)]);
        assert_eq!(repository.all().len(), 1);

        tx.send(vec![
            post("b", Category::Fashion, 400),
            post("a", Category::News, 300),
        ])
        .unwrap();
        let all = repository.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, PostId::new("b"));
    }

    #[tokio::test]
    async fn home_filter_equals_all() {
        let (repository, _tx, _handle) = repository_with(vec![
            post("a", Category::Fashion, 300),
            post("b", Category::News, 200),
            post("c", Category::News, 100),
        ]);
        assert_eq!(repository.filtered_by(CategoryFilter::Home), repository.all());
    }

    #[tokio::test]
    async fn category_filter_preserves_relative_order() {
        // Store pushes sorted: [300 Fashion, 200 News, 100 News].
        let (repository, _tx, _handle) = repository_with(vec![
            post("a", Category::Fashion, 300),
            post("b", Category::News, 200),
            post("c", Category::News, 100),
        ]);

        let news = repository.filtered_by(CategoryFilter::Only(Category::News));
        let timestamps: Vec<i64> = news.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![200, 100]);
    }

    #[tokio::test]
    async fn push_replaces_the_collection_wholesale() {
        let (repository, tx, _handle) = repository_with(vec![post("a", Category::News, 100)]);

        // The new push does not contain "a"; no merging happens.
        tx.send(vec![post("b", Category::Video, 500)]).unwrap();
        let all = repository.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, PostId::new("b"));
    }

    #[tokio::test]
    async fn ended_subscription_keeps_last_known_collection() {
        let (mut repository, tx, _handle) = repository_with(vec![post("a", Category::News, 100)]);
        drop(tx);

        assert!(!repository.changed().await);
        // Stale but available.
        assert_eq!(repository.all().len(), 1);
    }

    #[tokio::test]
    async fn unconfigured_feed_reads_as_permanently_empty() {
        let (mut repository, _handle) = PostRepository::attach(Subscription::unconfigured());
        assert_eq!(repository.feed_state(), FeedState::Unconfigured);
        assert!(repository.all().is_empty());
        assert!(!repository.changed().await);
    }
}
