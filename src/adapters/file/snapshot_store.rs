use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::CatalogSnapshot;
use crate::ports::snapshot_store::{Result, SnapshotStore as SnapshotStoreTrait};

/// JSONファイルによるSnapshotStore実装
///
/// 保存のたびに同じディレクトリへ専用の一時ファイルを作り、
/// 書き出し・fsyncの後に`rename`で差し替える。
/// 書き込み途中で失敗しても既存のファイルは変更されず、一時ファイルも残らない。
/// 同時に複数の保存が走っても、最後に差し替えた完全なファイルだけが見える。
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotStore;

impl SnapshotStore {
    pub fn new() -> Self {
        Self
    }

    /// 一時ファイルへ書き出してから保存先に差し替える（ブロッキング）
    fn write_atomically(location: &Path, bytes: &[u8]) -> io::Result<()> {
        let file_name = location.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("snapshot location has no file name: {}", location.display()),
            )
        })?;
        let dir = match location.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut prefix = OsString::from(".");
        prefix.push(file_name);
        prefix.push(".");

        // drop時に削除されるので、失敗した経路では一時ファイルは残らない
        let mut temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(&dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(location)?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStoreTrait for SnapshotStore {
    async fn save(&self, location: &Path, snapshot: &CatalogSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let len = bytes.len();
        let target = location.to_path_buf();

        tokio::task::spawn_blocking(move || Self::write_atomically(&target, &bytes)).await??;

        tracing::debug!(location = %location.display(), bytes = len, "Snapshot written");
        Ok(())
    }

    async fn load(&self, location: &Path) -> Result<CatalogSnapshot> {
        let bytes = tokio::fs::read(location).await?;
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(snapshot)
    }
}
