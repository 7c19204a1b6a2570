use crate::domain::events::DomainEvent;

/// カタログイベントの出力先ポート
///
/// カタログサービスはプロセス全体のロガーに直接依存せず、
/// 注入されたシンクにドメインイベントを渡す。
/// 実装は構造化ログ、テスト用の記録などが考えられる。
pub trait CatalogEventSink: Send + Sync {
    /// イベントを発行する
    ///
    /// カタログのロック解放後に呼ばれる。失敗しても操作結果には影響しない。
    fn publish(&self, event: &DomainEvent);
}
