use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Isbn, MemberId};

/// イベント：書籍がカタログに追加された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAdded {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub added_at: DateTime<Utc>,
}

/// イベント：書籍がカタログから削除された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRemoved {
    pub isbn: Isbn,
}

/// イベント：会員が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRegistered {
    pub member_id: MemberId,
    pub joined_at: DateTime<Utc>,
}

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCheckedOut {
    pub isbn: Isbn,
    pub member_id: MemberId,
    pub checked_out_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub isbn: Isbn,
    pub member_id: MemberId,
    pub returned_at: DateTime<Utc>,
    pub was_overdue: bool,
}

/// イベント：カタログがスナップショットに保存された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSaved {
    pub location: String,
    pub book_count: usize,
    pub member_count: usize,
}

/// イベント：カタログがスナップショットから復元された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRestored {
    pub location: String,
    pub name: String,
    pub book_count: usize,
    pub member_count: usize,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    BookAdded(BookAdded),
    BookRemoved(BookRemoved),
    MemberRegistered(MemberRegistered),
    BookCheckedOut(BookCheckedOut),
    BookReturned(BookReturned),
    CatalogSaved(CatalogSaved),
    CatalogRestored(CatalogRestored),
}
