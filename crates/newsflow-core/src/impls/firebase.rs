//! FirebaseStore - realtime database adapter (REST + SSE).
//!
//! # ワイヤプロトコル
//! - create: `POST {database_url}/posts.json` → `{"name": "<push key>"}`
//! - live feed: `GET posts.json` を `Accept: text/event-stream` で開き、
//!   `put` / `patch` イベントのたびにスナップショット全体を取り直して
//!   ソートして配信する（差分適用はしない）
//!
//! # 接続断
//! ストリームが切れても最後に配信したコレクションは watch チャネルに
//! 残るので、読者には stale-but-available で見え続ける。listener は
//! 固定ディレイで再接続を試みる。

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::domain::post::sort_newest_first;
use crate::domain::{Post, PostId, PostRecord, StoreError};
use crate::ports::{PostStore, Subscription, SubscriptionHandle};

const COLLECTION: &str = "posts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Explicitly constructed store client. Build once at startup, inject
/// where needed; teardown happens through the subscription handle.
pub struct FirebaseStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl FirebaseStore {
    pub fn new(config: StoreConfig) -> Self {
        // No client-wide timeout: the SSE stream is deliberately
        // open-ended. One-shot requests get their own deadline below.
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/{}.json",
            self.config.database_url.trim_end_matches('/'),
            COLLECTION
        )
    }
}

#[async_trait]
impl PostStore for FirebaseStore {
    async fn subscribe(&self) -> Subscription {
        if !self.config.is_configured() {
            warn!("realtime store credentials are placeholders; posts will not load");
            return Subscription::unconfigured();
        }

        let (tx, rx) = watch::channel(Vec::new());
        let client = self.client.clone();
        let url = self.collection_url();
        let api_key = self.config.api_key.clone();
        let task = tokio::spawn(listen_loop(client, url, api_key, tx));

        Subscription::live(rx, SubscriptionHandle::for_task(task))
    }

    async fn create(&self, record: PostRecord) -> Result<PostId, StoreError> {
        if !self.config.is_configured() {
            return Err(StoreError::Unconfigured);
        }

        let response = timeout(
            REQUEST_TIMEOUT,
            self.client
                .post(self.collection_url())
                .query(&[("auth", self.config.api_key.as_str())])
                .json(&record)
                .send(),
        )
        .await
        .map_err(|_| StoreError::Timeout(REQUEST_TIMEOUT))?
        .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected(format!("HTTP {}", status.as_u16())));
        }

        /// The store echoes the key it assigned to the new child.
        #[derive(Debug, Deserialize)]
        struct CreateResponse {
            name: String,
        }

        let body: CreateResponse = timeout(REQUEST_TIMEOUT, response.json())
            .await
            .map_err(|_| StoreError::Timeout(REQUEST_TIMEOUT))?
            .map_err(|e| StoreError::Transport(format!("malformed create response: {e}")))?;

        Ok(PostId::new(body.name))
    }
}

/// Reconnecting listener. Runs until the subscription is dropped.
async fn listen_loop(
    client: reqwest::Client,
    url: String,
    api_key: String,
    tx: watch::Sender<Vec<Post>>,
) {
    loop {
        match stream_events(&client, &url, &api_key, &tx).await {
            Ok(()) => debug!("event stream closed"),
            Err(err) => warn!(%err, "event stream failed; keeping last known posts"),
        }
        if tx.is_closed() {
            return;
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

/// Consume one SSE connection, refetching and pushing the full snapshot
/// on every data-bearing event. Returns Ok when the receiver side is
/// gone or the server closed the stream cleanly.
async fn stream_events(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    tx: &watch::Sender<Vec<Post>>,
) -> Result<(), StoreError> {
    let response = client
        .get(url)
        .query(&[("auth", api_key)])
        .header(ACCEPT, "text/event-stream")
        .send()
        .await
        .map_err(|e| StoreError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(StoreError::Rejected(format!("HTTP {}", status.as_u16())));
    }

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| StoreError::Transport(e.to_string()))?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        // SSE frames are separated by a blank line.
        while let Some(end) = buffer.find("\n\n") {
            let frame: String = buffer.drain(..end + 2).collect();
            if event_mutates(&frame) {
                let posts = fetch_snapshot(client, url, api_key).await?;
                if tx.send(posts).is_err() {
                    // Unsubscribed; stop listening.
                    return Ok(());
                }
            }
        }
    }

    Ok(())
}

/// `put` and `patch` carry data changes. `keep-alive`, `cancel` and
/// `auth_revoked` do not warrant a refetch (the latter two will fail the
/// stream on their own soon enough).
fn event_mutates(frame: &str) -> bool {
    frame
        .lines()
        .any(|line| matches!(line.trim(), "event: put" | "event: patch"))
}

/// Fetch the whole collection and sort it newest first.
///
/// The snapshot decodes through a `BTreeMap`, so posts with equal
/// timestamps order stably by id. An absent collection reads as `null`
/// and becomes the empty vec.
async fn fetch_snapshot(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
) -> Result<Vec<Post>, StoreError> {
    let response = timeout(
        REQUEST_TIMEOUT,
        client.get(url).query(&[("auth", api_key)]).send(),
    )
    .await
    .map_err(|_| StoreError::Timeout(REQUEST_TIMEOUT))?
    .map_err(|e| StoreError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(StoreError::Rejected(format!("HTTP {}", status.as_u16())));
    }

    let snapshot: Option<BTreeMap<String, PostRecord>> = timeout(REQUEST_TIMEOUT, response.json())
        .await
        .map_err(|_| StoreError::Timeout(REQUEST_TIMEOUT))?
        .map_err(|e| StoreError::Transport(format!("malformed snapshot: {e}")))?;

    Ok(snapshot_to_posts(snapshot))
}

fn snapshot_to_posts(snapshot: Option<BTreeMap<String, PostRecord>>) -> Vec<Post> {
    let mut posts: Vec<Post> = snapshot
        .unwrap_or_default()
        .into_iter()
        .map(|(id, record)| Post::from_record(PostId::new(id), record))
        .collect();
    sort_newest_first(&mut posts);
    posts
}
