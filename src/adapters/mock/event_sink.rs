use std::sync::{Mutex, PoisonError};

use crate::domain::events::DomainEvent;
use crate::ports::event_sink::CatalogEventSink;

/// CatalogEventSinkのモック実装
///
/// 発行されたイベントを順に記録する。ログには何も出力しない。
#[derive(Debug, Default)]
pub struct EventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録済みイベントのコピー
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CatalogEventSink for EventSink {
    fn publish(&self, event: &DomainEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
