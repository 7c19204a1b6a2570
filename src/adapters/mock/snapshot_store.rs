use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::CatalogSnapshot;
use crate::ports::snapshot_store::{Result, SnapshotStore as SnapshotStoreTrait};

/// SnapshotStoreのモック実装
///
/// 保存先ごとにJSON文字列としてメモリに保持する。
/// 書き込み失敗を再現するためのフラグを持つ。
#[derive(Debug, Default)]
pub struct SnapshotStore {
    documents: Mutex<HashMap<PathBuf, String>>,
    fail_saves: Mutex<bool>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用に任意の文書を配置する（壊れたJSONも可）
    pub fn put_raw(&self, location: impl Into<PathBuf>, document: impl Into<String>) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.into(), document.into());
    }

    /// 保存済みの文書を取得する
    pub fn raw(&self, location: &Path) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .cloned()
    }

    /// 以降の保存をすべて失敗させる
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap_or_else(PoisonError::into_inner) = fail;
    }
}

#[async_trait]
impl SnapshotStoreTrait for SnapshotStore {
    async fn save(&self, location: &Path, snapshot: &CatalogSnapshot) -> Result<()> {
        if *self.fail_saves.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(format!("mock save failure: {}", location.display()).into());
        }
        let document = serde_json::to_string_pretty(snapshot)?;
        self.put_raw(location, document);
        Ok(())
    }

    async fn load(&self, location: &Path) -> Result<CatalogSnapshot> {
        let document = self
            .raw(location)
            .ok_or_else(|| format!("no snapshot at {}", location.display()))?;
        Ok(serde_json::from_str(&document)?)
    }
}
