use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Book, CatalogRestored, CatalogSaved, CatalogStatistics, Member, commands::*};

// ============================================================================
// Requests
// ============================================================================

/// 書籍追加リクエスト（POST /books）
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_year: i32,
}

impl AddBookRequest {
    pub fn to_command(self, added_at: DateTime<Utc>) -> AddBook {
        AddBook {
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            publication_year: self.publication_year,
            added_at,
        }
    }
}

/// 会員登録リクエスト（POST /members）
#[derive(Debug, Deserialize)]
pub struct RegisterMemberRequest {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl RegisterMemberRequest {
    pub fn to_command(self, joined_at: DateTime<Utc>) -> RegisterMember {
        RegisterMember {
            id: self.id,
            name: self.name,
            email: self.email,
            joined_at,
        }
    }
}

/// 貸出・返却リクエスト（POST /checkouts, POST /returns）
#[derive(Debug, Deserialize)]
pub struct CirculationRequest {
    pub member_id: String,
    pub isbn: String,
}

impl CirculationRequest {
    pub fn to_checkout(self, checked_out_at: DateTime<Utc>) -> CheckoutBook {
        CheckoutBook {
            member_id: self.member_id,
            isbn: self.isbn,
            checked_out_at,
        }
    }

    pub fn to_return(self, returned_at: DateTime<Utc>) -> ReturnBook {
        ReturnBook {
            member_id: self.member_id,
            isbn: self.isbn,
            returned_at,
        }
    }
}

/// 書籍検索のクエリパラメータ（GET /books）
#[derive(Debug, Default, Deserialize)]
pub struct SearchBooksQuery {
    /// タイトルまたは著者
    pub q: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub status: Option<String>,
}

impl SearchBooksQuery {
    pub fn to_command(self) -> SearchBooks {
        SearchBooks {
            query: self.q,
            title: self.title,
            author: self.author,
            year_from: self.year_from,
            year_to: self.year_to,
            status: self.status,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub status: String,
    pub checkout_member_id: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            isbn: book.isbn.value().to_string(),
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
            status: book.status.as_str().to_string(),
            checkout_member_id: book.checkout_member_id.map(|id| id.value().to_string()),
            due_date: book.due_date,
        }
    }
}

/// 会員レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub join_date: DateTime<Utc>,
    pub books_checked_out: Vec<String>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value().to_string(),
            name: member.name,
            email: member.email,
            join_date: member.join_date,
            books_checked_out: member
                .books_checked_out
                .iter()
                .map(|isbn| isbn.value().to_string())
                .collect(),
        }
    }
}

/// 統計レスポンス（GET /stats）
#[derive(Debug, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub name: String,
    pub total_books: usize,
    pub total_members: usize,
    pub available_books: usize,
    pub checked_out_books: usize,
    pub overdue_books: usize,
}

impl From<CatalogStatistics> for StatisticsResponse {
    fn from(stats: CatalogStatistics) -> Self {
        Self {
            name: stats.name,
            total_books: stats.total_books,
            total_members: stats.total_members,
            available_books: stats.available_books,
            checked_out_books: stats.checked_out_books,
            overdue_books: stats.overdue_books,
        }
    }
}

/// スナップショット操作のレスポンス（POST /snapshot/save, POST /snapshot/load）
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub location: String,
    /// 読み込み時のみ（復元した図書館名）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub book_count: usize,
    pub member_count: usize,
}

impl From<CatalogSaved> for SnapshotResponse {
    fn from(event: CatalogSaved) -> Self {
        Self {
            location: event.location,
            name: None,
            book_count: event.book_count,
            member_count: event.member_count,
        }
    }
}

impl From<CatalogRestored> for SnapshotResponse {
    fn from(event: CatalogRestored) -> Self {
        Self {
            location: event.location,
            name: Some(event.name),
            book_count: event.book_count,
            member_count: event.member_count,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
