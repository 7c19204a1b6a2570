use chrono::{DateTime, Utc};

use super::{
    Book, BookCheckedOut, BookReturned, BookStatus, CheckoutError, CheckoutLimit, LoanPeriod,
    Member, ReturnError,
};

/// 貸出ポリシー
///
/// `checkout_limit`に既定値はない。設定から明示的に与える。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CirculationPolicy {
    pub checkout_limit: CheckoutLimit,
    pub loan_period: LoanPeriod,
}

impl CirculationPolicy {
    pub fn new(checkout_limit: CheckoutLimit, loan_period: LoanPeriod) -> Self {
        Self {
            checkout_limit,
            loan_period,
        }
    }
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 貸出中の書籍は貸し出せない（依頼者が誰であっても）
/// - 会員の貸出冊数が上限未満であること
/// - 返却期限 = 貸出日時 + 貸出期間
///
/// 副作用なし。更新後のBookとMember、イベントを返す。
/// 呼び出し側は両方を同一のクリティカルセクション内で保存すること。
pub fn checkout(
    book: &Book,
    member: &Member,
    policy: &CirculationPolicy,
    checked_out_at: DateTime<Utc>,
) -> Result<(Book, Member, BookCheckedOut), CheckoutError> {
    // バリデーション：貸出中
    if book.status == BookStatus::CheckedOut {
        if book.checkout_member_id.as_ref() == Some(&member.id) {
            return Err(CheckoutError::AlreadyCheckedOutByRequester {
                isbn: book.isbn.clone(),
                title: book.title.clone(),
            });
        }
        return Err(CheckoutError::AlreadyCheckedOut {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
        });
    }

    // バリデーション：貸出上限
    if !policy.checkout_limit.allows(member.checkout_count()) {
        return Err(CheckoutError::LimitReached {
            member_id: member.id.clone(),
            limit: policy.checkout_limit.value(),
        });
    }

    let due_date = checked_out_at
        .checked_add_signed(policy.loan_period.duration())
        .ok_or_else(|| CheckoutError::DueDateOutOfRange {
            isbn: book.isbn.clone(),
        })?;

    let new_book = Book {
        status: BookStatus::CheckedOut,
        checkout_member_id: Some(member.id.clone()),
        due_date: Some(due_date),
        ..book.clone()
    };

    let mut new_member = member.clone();
    new_member.books_checked_out.insert(book.isbn.clone());

    let event = BookCheckedOut {
        isbn: book.isbn.clone(),
        member_id: member.id.clone(),
        checked_out_at,
        due_date,
    };

    Ok((new_book, new_member, event))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 貸出中であること
/// - 借りている本人からの返却であること
/// - 延滞していても返却は受け付ける
///
/// 副作用なし。更新後のBookとMember、イベントを返す。
pub fn return_book(
    book: &Book,
    member: &Member,
    returned_at: DateTime<Utc>,
) -> Result<(Book, Member, BookReturned), ReturnError> {
    // バリデーション：貸出されていない
    if book.status == BookStatus::Available {
        return Err(ReturnError::NotCheckedOut {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
        });
    }

    // バリデーション：別の会員に貸出中
    if book.checkout_member_id.as_ref() != Some(&member.id) {
        return Err(ReturnError::WrongHolder {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            member_id: member.id.clone(),
        });
    }

    let was_overdue = is_overdue(book, returned_at);

    let new_book = Book {
        status: BookStatus::Available,
        checkout_member_id: None,
        due_date: None,
        ..book.clone()
    };

    let mut new_member = member.clone();
    new_member.books_checked_out.remove(&book.isbn);

    let event = BookReturned {
        isbn: book.isbn.clone(),
        member_id: member.id.clone(),
        returned_at,
        was_overdue,
    };

    Ok((new_book, new_member, event))
}

/// 純粋関数：延滞判定
///
/// 返却期限のない貸出（期限導入前のデータ）は延滞扱いしない。
pub fn is_overdue(book: &Book, now: DateTime<Utc>) -> bool {
    book.status == BookStatus::CheckedOut && book.due_date.is_some_and(|due| now > due)
}
