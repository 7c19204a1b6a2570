use thiserror::Error;

use super::{Isbn, MemberId};

/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// 他の会員に貸出中
    #[error("Book '{title}' (ISBN: {isbn}) is already checked out")]
    AlreadyCheckedOut { isbn: Isbn, title: String },

    /// 依頼した会員自身が既に借りている
    #[error("Book '{title}' (ISBN: {isbn}) is already checked out by you")]
    AlreadyCheckedOutByRequester { isbn: Isbn, title: String },

    /// 会員の貸出冊数が上限に達している
    #[error("Member {member_id} has reached the checkout limit ({limit} books)")]
    LimitReached { member_id: MemberId, limit: u32 },

    /// 返却期限が表現できる日時の範囲を超える
    #[error("Due date for book (ISBN: {isbn}) is out of range")]
    DueDateOutOfRange { isbn: Isbn },

    /// 貸出中の書籍はカタログから削除できない
    #[error("Book (ISBN: {isbn}) is checked out by member {member_id} and cannot be removed")]
    BookOnLoan { isbn: Isbn, member_id: MemberId },
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnError {
    /// 貸出されていない
    #[error("Book '{title}' (ISBN: {isbn}) is not checked out")]
    NotCheckedOut { isbn: Isbn, title: String },

    /// 別の会員に貸出中
    #[error("Book '{title}' (ISBN: {isbn}) is not checked out by member {member_id}")]
    WrongHolder {
        isbn: Isbn,
        title: String,
        member_id: MemberId,
    },
}

/// スナップショット復元時の整合性エラー
///
/// 復元前に検出し、稼働中のカタログには一切触れない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("invalid ISBN in snapshot: {0}")]
    InvalidIsbn(Isbn),

    #[error("duplicate book in snapshot: {0}")]
    DuplicateBook(Isbn),

    #[error("duplicate member in snapshot: {0}")]
    DuplicateMember(MemberId),

    /// 状態と貸出会員IDが食い違っている
    #[error("book {0} has inconsistent status and holder")]
    InconsistentStatus(Isbn),

    /// 書籍側の貸出会員が存在しない、またはその会員の貸出一覧に含まれない
    #[error("book {isbn} is checked out by {member_id}, who does not hold it")]
    OrphanedCheckout { isbn: Isbn, member_id: MemberId },

    /// 会員側の貸出一覧にある書籍が存在しない、または別会員に貸出中
    #[error("member {member_id} holds {isbn}, which is not checked out to them")]
    DanglingHolding { member_id: MemberId, isbn: Isbn },
}
