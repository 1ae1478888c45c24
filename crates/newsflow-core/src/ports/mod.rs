//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システム（realtime store, image hosting API）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - Store が source of truth（正本）: クライアントは購読で受け取るだけ
//! - 全コレクション配信: 差分ではなくソート済みの全件を毎回受け取る
//! - Clock / IdGenerator はテスト容易性のために trait 化

pub mod clock;
pub mod id_generator;
pub mod image_host;
pub mod post_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::image_host::ImageHost;
pub use self::post_store::{FeedState, PostStore, Subscription, SubscriptionHandle};
