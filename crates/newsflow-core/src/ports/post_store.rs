//! PostStore port - realtime store への抽象インターフェース
//!
//! # 配信モデル
//! store 側の変更のたびに、ソート済みの**全コレクション**が
//! `tokio::sync::watch` チャネルで配信されます。差分配信にしない理由:
//! Repository の不変条件（常に全件・常にソート済み）が自明に保てるため。
//! コーパスは数十〜数百件の想定なので再送コストは許容範囲。
//!
//! # 失敗時の扱い
//! 未設定・到達不能の backend でも `subscribe` はエラーにせず、
//! no-op の unsubscribe handle と `FeedState::Unconfigured` を返します。
//! 呼び出し側はバナー表示などに落とし、クラッシュさせない。

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{Post, PostId, PostRecord, StoreError};

/// Whether a subscription actually reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// Connected (or connecting); pushes will arrive on the channel.
    Live,
    /// Credentials missing or placeholders. No connection was attempted;
    /// the collection stays permanently empty until reconfigured.
    Unconfigured,
}

/// Handle that terminates a live subscription.
///
/// After `unsubscribe` returns, no further pushes reach the channel.
/// Dropping the handle has the same effect, so an abandoned subscription
/// does not leak its listener task.
#[derive(Debug)]
pub struct SubscriptionHandle {
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    /// A handle with nothing to stop (unconfigured subscriptions).
    pub fn noop() -> Self {
        Self { task: None }
    }

    pub fn for_task(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    pub fn unsubscribe(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// A standing live connection to the "posts" collection.
///
/// The watch receiver always holds the last pushed collection, which is
/// exactly the stale-but-available behavior wanted on connection loss:
/// readers keep seeing the last known posts until a fresh push arrives.
#[derive(Debug)]
pub struct Subscription {
    state: FeedState,
    receiver: watch::Receiver<Vec<Post>>,
    handle: SubscriptionHandle,
}

impl Subscription {
    pub fn live(receiver: watch::Receiver<Vec<Post>>, handle: SubscriptionHandle) -> Self {
        Self {
            state: FeedState::Live,
            receiver,
            handle,
        }
    }

    /// A subscription that never connected: empty collection, no-op handle.
    pub fn unconfigured() -> Self {
        let (_tx, receiver) = watch::channel(Vec::new());
        Self {
            state: FeedState::Unconfigured,
            receiver,
            handle: SubscriptionHandle::noop(),
        }
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn into_parts(self) -> (FeedState, watch::Receiver<Vec<Post>>, SubscriptionHandle) {
        (self.state, self.receiver, self.handle)
    }
}

/// PostStore は realtime store への入口
///
/// # 契約
/// - `subscribe`: 初回接続時と以降の全ての remote mutation で、timestamp
///   降順ソート済みの全コレクションを配信（同値は安定順）。
/// - `create`: レコードを追記し、store が id を割り当てる。書き込みが
///   durably accepted された時点で resolve。**同期的な可視性は保証しない**:
///   新しい post は subscription の push 経由でのみ観測される。
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn subscribe(&self) -> Subscription;

    async fn create(&self, record: PostRecord) -> Result<PostId, StoreError>;
}
