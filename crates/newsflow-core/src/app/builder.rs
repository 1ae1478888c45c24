//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - gateway が登録されないまま `build()` されたら即 `BuildError`
//! - 起動時に欠けている配線を明確なエラーメッセージで知らせる
//!
//! かつての「モジュールグローバルな接続を遅延初期化」ではなく、起動時に
//! 一度だけ構築して注入する。teardown は subscription handle の
//! unsubscribe で行う。

use std::sync::Arc;

use crate::app::{PostRepository, Publisher};
use crate::config::AppConfig;
use crate::impls::{FirebaseStore, ImgbbHost};
use crate::ports::{Clock, ImageHost, PostStore, SubscriptionHandle, SystemClock};

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no post store was registered")]
    MissingStore,

    #[error("no image host was registered")]
    MissingImageHost,
}

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .with_store(Arc::new(InMemoryPostStore::new()))
///     .with_image_host(Arc::new(ImgbbHost::new("key")))
///     .build()?;
/// ```
pub struct AppBuilder {
    store: Option<Arc<dyn PostStore>>,
    images: Option<Arc<dyn ImageHost>>,
    clock: Arc<dyn Clock>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            images: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Wire the production adapters straight from a config. An
    /// unconfigured store section still builds; the store adapter
    /// renders it as a permanently-empty feed instead of failing here.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .with_store(Arc::new(FirebaseStore::new(config.store.clone())))
            .with_image_host(Arc::new(ImgbbHost::new(config.images.api_key.clone())))
    }

    pub fn with_store(mut self, store: Arc<dyn PostStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_image_host(mut self, images: Arc<dyn ImageHost>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let store = self.store.ok_or(BuildError::MissingStore)?;
        let images = self.images.ok_or(BuildError::MissingImageHost)?;
        Ok(App {
            store,
            images,
            clock: self.clock,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// App はワイヤリング済みのランタイム
///
/// construct once at startup; dispose by unsubscribing the feed handle.
pub struct App {
    store: Arc<dyn PostStore>,
    images: Arc<dyn ImageHost>,
    clock: Arc<dyn Clock>,
}

impl App {
    /// Open the live feed: subscribe and hand back the read-side
    /// repository plus the handle that tears the connection down.
    pub async fn open_feed(&self) -> (PostRepository, SubscriptionHandle) {
        PostRepository::attach(self.store.subscribe().await)
    }

    /// The authoring flow, sharing this app's gateways.
    pub fn publisher(&self) -> Publisher {
        Publisher::new(self.store.clone(), self.images.clone(), self.clock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryPostStore;

    use async_trait::async_trait;

    use crate::domain::{ImageFile, UploadError};

    struct NoopHost;

    #[async_trait]
    impl ImageHost for NoopHost {
        async fn upload(&self, _image: &ImageFile) -> Result<String, UploadError> {
            Ok("https://img/noop.png".to_string())
        }
    }

    #[test]
    fn build_fails_without_a_store() {
        let result = AppBuilder::new()
            .with_image_host(Arc::new(NoopHost))
            .build();
        assert!(matches!(result, Err(BuildError::MissingStore)));
    }

    #[test]
    fn build_fails_without_an_image_host() {
        let result = AppBuilder::new()
            .with_store(Arc::new(InMemoryPostStore::new()))
            .build();
        assert!(matches!(result, Err(BuildError::MissingImageHost)));
    }

    #[tokio::test]
    async fn built_app_opens_a_feed_and_publishes() {
        let app = AppBuilder::new()
            .with_store(Arc::new(InMemoryPostStore::new()))
            .with_image_host(Arc::new(NoopHost))
            .build()
            .unwrap();

        let (mut repository, _handle) = app.open_feed().await;
        assert!(repository.all().is_empty());

        let draft = crate::domain::PostDraft {
            title: "Wired".to_string(),
            category: "Gadgets".to_string(),
            image: Some(ImageFile::new("x.png", vec![1])),
            content: "<p>hello</p>".to_string(),
        };
        app.publisher().publish(draft).await.unwrap();

        assert!(repository.changed().await);
        let all = repository.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Wired");
        assert_eq!(all[0].image_url, "https://img/noop.png");
    }

    #[test]
    fn from_config_builds_even_with_placeholders() {
        let app = AppBuilder::from_config(&AppConfig::default()).build();
        assert!(app.is_ok());
    }
}
