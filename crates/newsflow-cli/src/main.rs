use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use newsflow_core::app::AppBuilder;
use newsflow_core::config::AppConfig;
use newsflow_core::domain::{Category, CategoryFilter, ImageFile, PostDraft, UploadError};
use newsflow_core::impls::InMemoryPostStore;
use newsflow_core::ports::{FeedState, ImageHost};

/// 未設定デモ用の image host：アップロードせず擬似 URL を返す
struct LocalImageHost;

#[async_trait]
impl ImageHost for LocalImageHost {
    async fn upload(&self, image: &ImageFile) -> Result<String, UploadError> {
        Ok(format!("memory://images/{}", image.file_name))
    }
}

fn config_path() -> PathBuf {
    std::env::var_os("NEWSFLOW_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("newsflow.toml"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // (A) 設定を読み込み、アダプタを選ぶ
    let config = match AppConfig::load_or_default(&config_path()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            std::process::exit(2);
        }
    };

    let app = if config.store.is_configured() {
        AppBuilder::from_config(&config)
    } else {
        println!("store credentials are placeholders; running the in-memory demo");
        AppBuilder::new()
            .with_store(Arc::new(InMemoryPostStore::new()))
            .with_image_host(Arc::new(LocalImageHost))
    }
    .build()
    .unwrap_or_else(|err| {
        eprintln!("wiring error: {err}");
        std::process::exit(2);
    });

    // (B) 購読を開き、push を表示する watcher を起動
    let (repository, handle) = app.open_feed().await;
    if repository.feed_state() == FeedState::Unconfigured {
        println!("feed is unconfigured: the collection stays empty until credentials are set");
    }

    let watcher = tokio::spawn({
        let mut feed = repository.clone();
        async move {
            while feed.changed().await {
                println!("--- collection replaced ({} posts) ---", feed.all().len());
                for post in feed.all() {
                    println!("  [{}] {} ({})", post.category, post.title, post.timestamp);
                }
            }
        }
    });

    // (C) サンプル記事を publish（失敗してもプロセスは落とさない）
    let draft = PostDraft {
        title: "Hello from newsflow-cli".to_string(),
        category: Category::News.to_string(),
        image: Some(ImageFile::new("hello.png", vec![0x89, 0x50, 0x4e, 0x47])),
        content: "<p>First post published through the authoring flow.</p>".to_string(),
    };
    match app.publisher().publish(draft).await {
        Ok(()) => println!("published; waiting for the subscription push..."),
        Err(err) => warn!(%err, "publish failed"),
    }

    // (D) push が届くのを少し待ってから、News だけ表示して終了
    sleep(Duration::from_millis(300)).await;
    let news = repository.filtered_by(CategoryFilter::Only(Category::News));
    println!("news posts: {}", news.len());

    // (E) teardown: 購読を止めて watcher を終わらせる
    handle.unsubscribe();
    watcher.abort();
}
