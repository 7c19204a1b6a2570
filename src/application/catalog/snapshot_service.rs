use std::path::Path;

use crate::domain::{Catalog, CatalogRestored, CatalogSaved, DomainEvent};

use super::catalog_service::ServiceDependencies;
use super::errors::{CatalogApplicationError, Result};

/// カタログ全体をスナップショットとして保存する
///
/// ロック内ではスナップショットの複製だけを行い、書き込みはロック解放後に行う。
/// 保存の失敗時、保存先の既存ファイルは変更されない（アダプタの保証）。
/// 成功時は発行したイベント（保存件数の要約）を返す。
pub async fn save_snapshot(deps: &ServiceDependencies, location: &Path) -> Result<CatalogSaved> {
    let snapshot = deps.catalog.lock().await.to_snapshot();

    deps.snapshot_store
        .save(location, &snapshot)
        .await
        .map_err(|e| {
            tracing::error!(location = %location.display(), "Failed to save catalog: {}", e);
            CatalogApplicationError::PersistenceError(e)
        })?;

    let event = CatalogSaved {
        location: location.display().to_string(),
        book_count: snapshot.books.len(),
        member_count: snapshot.members.len(),
    };
    deps.event_sink
        .publish(&DomainEvent::CatalogSaved(event.clone()));

    Ok(event)
}

/// スナップショットからカタログ全体を置き換える
///
/// 読み込み・パース・整合性検証はすべてロック外で行い、
/// 成功した場合にのみロック内で一度に差し替える。
/// 失敗した場合、メモリ上のカタログは一切変更されない。
/// 成功時は発行したイベントを返す。
pub async fn load_snapshot(
    deps: &ServiceDependencies,
    location: &Path,
) -> Result<CatalogRestored> {
    // 1. 読み込みとパース
    let snapshot = deps.snapshot_store.load(location).await.map_err(|e| {
        tracing::error!(location = %location.display(), "Failed to load catalog: {}", e);
        CatalogApplicationError::PersistenceError(e)
    })?;

    // 2. 整合性検証
    let restored = Catalog::from_snapshot(snapshot).map_err(|e| {
        tracing::error!(location = %location.display(), "Inconsistent snapshot: {}", e);
        CatalogApplicationError::PersistenceError(Box::new(e))
    })?;

    let event = CatalogRestored {
        location: location.display().to_string(),
        name: restored.name().to_string(),
        book_count: restored.book_count(),
        member_count: restored.member_count(),
    };

    // 3. 差し替え
    *deps.catalog.lock().await = restored;

    deps.event_sink
        .publish(&DomainEvent::CatalogRestored(event.clone()));

    Ok(event)
}
