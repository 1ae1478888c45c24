//! Adapters - port 実装
//!
//! - **InMemoryPostStore**: 開発・テスト用の store（プロセス内 watch 配信）
//! - **FirebaseStore**: realtime database の REST + SSE アダプタ
//! - **ImgbbHost**: 画像ホスティング REST アダプタ

pub mod firebase;
pub mod imgbb;
pub mod memory;

pub use self::firebase::FirebaseStore;
pub use self::imgbb::ImgbbHost;
pub use self::memory::InMemoryPostStore;
