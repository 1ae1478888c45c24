//! ImageHost port - 画像ホスティング API への抽象インターフェース

use async_trait::async_trait;

use crate::domain::{ImageFile, UploadError};

/// ImageHost は画像を外部ホスティングにアップロードする
///
/// # 契約
/// - 成功時: 公開 URL を返す
/// - transport 失敗 / 非 2xx / `success: false` は全て `UploadError`
/// - リトライは内部で行わない（必要なら呼び出し側の責務）
/// - backend の生のエラーペイロードは文字列メッセージ以上を漏らさない
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &ImageFile) -> Result<String, UploadError>;
}
