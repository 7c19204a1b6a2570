use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Isbn, MemberId, timestamp};

/// 書籍の貸出状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// 貸出可能
    Available,
    /// 貸出中
    CheckedOut,
}

impl BookStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked_out",
        }
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(BookStatus::Available),
            "checked_out" => Ok(BookStatus::CheckedOut),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

/// 書籍エンティティ
///
/// 不変条件：
/// - `status == CheckedOut` のとき、`checkout_member_id` が設定されている
///   （`due_date` は貸出時に必ず設定されるが、返却期限のない旧データは`None`）
/// - `status == Available` のとき、どちらも`None`
///
/// 状態の変更は`circulation`の純粋関数経由でのみ行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub status: BookStatus,
    pub checkout_member_id: Option<MemberId>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Book {
    /// 貸出可能な状態で新規作成
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
    ) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            publication_year,
            status: BookStatus::Available,
            checkout_member_id: None,
            due_date: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// 状態と貸出会員IDが食い違っていないか
    pub fn is_consistent(&self) -> bool {
        match self.status {
            BookStatus::Available => self.checkout_member_id.is_none() && self.due_date.is_none(),
            BookStatus::CheckedOut => self.checkout_member_id.is_some(),
        }
    }
}
