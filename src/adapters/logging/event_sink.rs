use crate::domain::events::DomainEvent;
use crate::ports::event_sink::CatalogEventSink;

/// tracingによるCatalogEventSink実装
///
/// ドメインイベントを構造化ログとしてINFOレベルで出力する。
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSink;

impl EventSink {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogEventSink for EventSink {
    fn publish(&self, event: &DomainEvent) {
        match event {
            DomainEvent::BookAdded(e) => tracing::info!(
                isbn = %e.isbn,
                title = %e.title,
                author = %e.author,
                publication_year = e.publication_year,
                "Book added"
            ),
            DomainEvent::BookRemoved(e) => tracing::info!(isbn = %e.isbn, "Book removed"),
            DomainEvent::MemberRegistered(e) => tracing::info!(
                member_id = %e.member_id,
                joined_at = %e.joined_at,
                "Member registered"
            ),
            DomainEvent::BookCheckedOut(e) => tracing::info!(
                isbn = %e.isbn,
                member_id = %e.member_id,
                due_date = %e.due_date,
                "Book checked out"
            ),
            DomainEvent::BookReturned(e) => tracing::info!(
                isbn = %e.isbn,
                member_id = %e.member_id,
                was_overdue = e.was_overdue,
                "Book returned"
            ),
            DomainEvent::CatalogSaved(e) => tracing::info!(
                location = %e.location,
                books = e.book_count,
                members = e.member_count,
                "Catalog saved"
            ),
            DomainEvent::CatalogRestored(e) => tracing::info!(
                location = %e.location,
                library = %e.name,
                books = e.book_count,
                members = e.member_count,
                "Catalog restored"
            ),
        }
    }
}
