use std::sync::Arc;

use chrono::Datelike;
use tokio::sync::Mutex;

use crate::domain::{
    self, Book, BookAdded, BookRemoved, BookStatus, Catalog, CheckoutError, DomainEvent, Isbn,
    Member, MemberId, MemberRegistered, circulation::CirculationPolicy, commands::*,
};
use crate::ports::*;

use super::errors::{CatalogApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、ユースケース関数に依存関係を渡す。
///
/// カタログは単一の共有資源として`Mutex`で保護する。
/// 各ユースケースはロックを1回だけ取得し、読み取り・検証・書き込みを
/// 同一のクリティカルセクション内で完了させる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub catalog: Arc<Mutex<Catalog>>,
    pub policy: CirculationPolicy,
    pub snapshot_store: Arc<dyn SnapshotStore>,
    pub event_sink: Arc<dyn CatalogEventSink>,
}

/// 必須項目が空（空白のみを含む）でないことを確認する
fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        tracing::warn!("{} cannot be empty", field);
        return Err(CatalogApplicationError::EmptyField(field));
    }
    Ok(())
}

/// 書籍をカタログに追加する
///
/// 検証順序：
/// 1. 必須項目（タイトル、著者、ISBN）
/// 2. ISBNの構文
/// 3. ISBNの重複（正規化後のキーで判定）
/// 4. 出版年（0〜現在の年）
///
/// 取り込み処理（スクレイパー等）が利用する唯一の入口でもある。
pub async fn add_book(deps: &ServiceDependencies, cmd: AddBook) -> Result<Book> {
    // 1. 必須項目
    require(&cmd.title, "Book title")?;
    require(&cmd.author, "Book author")?;
    require(&cmd.isbn, "Book ISBN")?;

    // 2. ISBNの構文
    if !domain::validation::validate_isbn(&cmd.isbn) {
        tracing::warn!(isbn = %cmd.isbn, "Invalid ISBN format");
        return Err(CatalogApplicationError::InvalidIsbn(cmd.isbn));
    }
    let isbn = Isbn::canonical(&cmd.isbn);

    let mut catalog = deps.catalog.lock().await;

    // 3. 重複確認
    if catalog.get_book(&isbn).is_some() {
        tracing::warn!(%isbn, "Book already exists");
        return Err(CatalogApplicationError::DuplicateBook(isbn));
    }

    // 4. 出版年
    let current_year = cmd.added_at.year();
    if !(0..=current_year).contains(&cmd.publication_year) {
        tracing::warn!(year = cmd.publication_year, "Invalid publication year");
        return Err(CatalogApplicationError::InvalidYear(cmd.publication_year));
    }

    let book = Book::new(isbn, cmd.title, cmd.author, cmd.publication_year);
    catalog.put_book(book.clone());
    drop(catalog);

    deps.event_sink.publish(&DomainEvent::BookAdded(BookAdded {
        isbn: book.isbn.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
        publication_year: book.publication_year,
        added_at: cmd.added_at,
    }));

    Ok(book)
}

/// 書籍をカタログから削除する
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 貸出中でないこと（会員の貸出一覧に宙に浮いた参照を残さない）
pub async fn remove_book(deps: &ServiceDependencies, isbn: &str) -> Result<()> {
    let isbn = Isbn::canonical(isbn);
    let mut catalog = deps.catalog.lock().await;

    let book = catalog
        .get_book(&isbn)
        .ok_or_else(|| CatalogApplicationError::BookNotFound(isbn.clone()))?;

    if let (BookStatus::CheckedOut, Some(member_id)) = (book.status, &book.checkout_member_id) {
        let err = CheckoutError::BookOnLoan {
            isbn: isbn.clone(),
            member_id: member_id.clone(),
        };
        tracing::warn!(%isbn, "{}", err);
        return Err(err.into());
    }

    catalog.remove_book(&isbn);
    drop(catalog);

    deps.event_sink
        .publish(&DomainEvent::BookRemoved(BookRemoved { isbn }));
    Ok(())
}

/// 会員を登録する
///
/// 検証順序：必須項目（ID、氏名、メール）→ メールの構文 → IDの重複
pub async fn register_member(deps: &ServiceDependencies, cmd: RegisterMember) -> Result<Member> {
    require(&cmd.id, "Member ID")?;
    require(&cmd.name, "Member name")?;
    require(&cmd.email, "Member email")?;

    if !domain::validation::validate_email(&cmd.email) {
        tracing::warn!(email = %cmd.email, "Invalid email format");
        return Err(CatalogApplicationError::InvalidEmail(cmd.email));
    }

    let member_id = MemberId::new(cmd.id);
    let mut catalog = deps.catalog.lock().await;

    if catalog.get_member(&member_id).is_some() {
        tracing::warn!(%member_id, "Member already exists");
        return Err(CatalogApplicationError::DuplicateMember(member_id));
    }

    let member = Member::new(member_id, cmd.name, cmd.email, cmd.joined_at);
    catalog.put_member(member.clone());
    drop(catalog);

    deps.event_sink
        .publish(&DomainEvent::MemberRegistered(MemberRegistered {
            member_id: member.id.clone(),
            joined_at: member.join_date,
        }));

    Ok(member)
}

/// ISBNで書籍を取得する（ISBNは正規化して照合）
pub async fn get_book(deps: &ServiceDependencies, isbn: &str) -> Option<Book> {
    let isbn = Isbn::canonical(isbn);
    deps.catalog.lock().await.get_book(&isbn).cloned()
}

/// IDで会員を取得する
pub async fn get_member(deps: &ServiceDependencies, id: &str) -> Option<Member> {
    let member_id = MemberId::new(id);
    deps.catalog.lock().await.get_member(&member_id).cloned()
}
