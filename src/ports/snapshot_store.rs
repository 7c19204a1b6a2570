use std::path::Path;

use async_trait::async_trait;

use crate::domain::CatalogSnapshot;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// スナップショットストアポート
///
/// カタログ全体の永続化と読み込みを抽象化する。
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// スナップショットを保存する
    ///
    /// 途中で失敗しても既存の保存先を壊してはならない（全部書けるか、何も変えないか）。
    async fn save(&self, location: &Path, snapshot: &CatalogSnapshot) -> Result<()>;

    /// スナップショットを読み込む
    ///
    /// 構造・パースの失敗はエラーとして返す。部分的な結果は返さない。
    async fn load(&self, location: &Path) -> Result<CatalogSnapshot>;
}
