use crate::domain::{self, Book, DomainEvent, Isbn, MemberId, commands::*};

use super::catalog_service::ServiceDependencies;
use super::errors::{CatalogApplicationError, Result};

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 会員が存在すること
/// - 書籍が存在すること
/// - 書籍が貸出可能であり、会員が貸出上限に達していないこと（判定は貸出エンジン）
///
/// # 一貫性保証
///
/// 更新後のBookとMemberは同一のロック内で保存される。
/// 他の操作が半端な状態（書籍は貸出中だが会員側に記録がない等）を観測することはない。
pub async fn checkout_book(deps: &ServiceDependencies, cmd: CheckoutBook) -> Result<Book> {
    let member_id = MemberId::new(cmd.member_id);
    let isbn = Isbn::canonical(&cmd.isbn);

    let mut catalog = deps.catalog.lock().await;

    // 1. 会員の存在確認
    let member = catalog.get_member(&member_id).ok_or_else(|| {
        tracing::warn!(%member_id, "Member not found");
        CatalogApplicationError::MemberNotFound(member_id.clone())
    })?;

    // 2. 書籍の存在確認
    let book = catalog.get_book(&isbn).ok_or_else(|| {
        tracing::warn!(%isbn, "Book not found");
        CatalogApplicationError::BookNotFound(isbn.clone())
    })?;

    // 3. 貸出エンジンで状態遷移を計算
    let (new_book, new_member, event) =
        domain::circulation::checkout(book, member, &deps.policy, cmd.checked_out_at)
            .inspect_err(|e| tracing::warn!(%isbn, %member_id, "Checkout failed: {}", e))?;

    // 4. 書籍と会員を同時に保存
    catalog.put_book(new_book.clone());
    catalog.put_member(new_member);
    drop(catalog);

    deps.event_sink.publish(&DomainEvent::BookCheckedOut(event));

    Ok(new_book)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 会員が存在すること
/// - 書籍が存在すること
/// - 書籍がその会員に貸出中であること（判定は貸出エンジン）
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<Book> {
    let member_id = MemberId::new(cmd.member_id);
    let isbn = Isbn::canonical(&cmd.isbn);

    let mut catalog = deps.catalog.lock().await;

    // 1. 会員の存在確認
    let member = catalog.get_member(&member_id).ok_or_else(|| {
        tracing::warn!(%member_id, "Member not found");
        CatalogApplicationError::MemberNotFound(member_id.clone())
    })?;

    // 2. 書籍の存在確認
    let book = catalog.get_book(&isbn).ok_or_else(|| {
        tracing::warn!(%isbn, "Book not found");
        CatalogApplicationError::BookNotFound(isbn.clone())
    })?;

    // 3. 貸出エンジンで状態遷移を計算
    let (new_book, new_member, event) =
        domain::circulation::return_book(book, member, cmd.returned_at)
            .inspect_err(|e| tracing::warn!(%isbn, %member_id, "Return failed: {}", e))?;

    // 4. 書籍と会員を同時に保存
    catalog.put_book(new_book.clone());
    catalog.put_member(new_member);
    drop(catalog);

    deps.event_sink.publish(&DomainEvent::BookReturned(event));

    Ok(new_book)
}
