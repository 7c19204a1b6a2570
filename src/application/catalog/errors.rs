use thiserror::Error;

use crate::domain::{CheckoutError, Isbn, MemberId, ReturnError};

/// カタログ管理アプリケーション層のエラー
///
/// 呼び出し側は種類（バリアント）で分岐する。
#[derive(Debug, Error)]
pub enum CatalogApplicationError {
    /// 必須項目が空
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// ISBNの構文が不正
    #[error("Invalid ISBN format: {0}")]
    InvalidIsbn(String),

    /// メールアドレスの構文が不正
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// 同じISBNの書籍が既に存在する
    #[error("Book with ISBN {0} already exists")]
    DuplicateBook(Isbn),

    /// 同じIDの会員が既に存在する
    #[error("Member with ID {0} already exists")]
    DuplicateMember(MemberId),

    /// 出版年が範囲外（0〜現在の年）
    #[error("Invalid publication year: {0}")]
    InvalidYear(i32),

    /// 書籍が見つからない
    #[error("Book with ISBN {0} not found")]
    BookNotFound(Isbn),

    /// 会員が見つからない
    #[error("Member with ID {0} not found")]
    MemberNotFound(MemberId),

    /// 貸出できない（貸出中、上限到達、貸出中の削除）
    #[error("{0}")]
    CheckoutError(#[from] CheckoutError),

    /// 返却できない（未貸出、別会員の貸出）
    #[error("{0}")]
    ReturnError(#[from] ReturnError),

    /// スナップショットの保存・読み込みの失敗
    #[error("Persistence error: {0}")]
    PersistenceError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogApplicationError>;
