use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Book, BookStatus, Isbn, Member, MemberId, SnapshotError, circulation, validation};

/// カタログ（エンティティストア）
///
/// 書籍（ISBN→Book）と会員（MemberID→Member）を排他的に所有する。
/// ここでは入力値のバリデーションを行わない。
/// バリデーションと不変条件の維持はアプリケーション層の責務。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    name: String,
    books: HashMap<Isbn, Book>,
    members: HashMap<MemberId, Member>,
}

/// カタログ全体のスナップショット（永続化フォーマット）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub name: String,
    pub books: Vec<Book>,
    pub members: Vec<Member>,
}

/// 統計情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub name: String,
    pub total_books: usize,
    pub total_members: usize,
    pub available_books: usize,
    pub checked_out_books: usize,
    pub overdue_books: usize,
}

impl Catalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            books: HashMap::new(),
            members: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_book(&self, isbn: &Isbn) -> Option<&Book> {
        self.books.get(isbn)
    }

    pub fn get_member(&self, id: &MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    /// 書籍を保存する（既存の場合は置き換え）
    pub fn put_book(&mut self, book: Book) {
        self.books.insert(book.isbn.clone(), book);
    }

    /// 会員を保存する（既存の場合は置き換え）
    pub fn put_member(&mut self, member: Member) {
        self.members.insert(member.id.clone(), member);
    }

    pub fn remove_book(&mut self, isbn: &Isbn) -> bool {
        self.books.remove(isbn).is_some()
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn statistics(&self, now: DateTime<Utc>) -> CatalogStatistics {
        let available_books = self.books().filter(|b| b.is_available()).count();
        let overdue_books = self
            .books()
            .filter(|b| circulation::is_overdue(b, now))
            .count();

        CatalogStatistics {
            name: self.name.clone(),
            total_books: self.book_count(),
            total_members: self.member_count(),
            available_books,
            checked_out_books: self.book_count() - available_books,
            overdue_books,
        }
    }

    /// スナップショットを作成する
    ///
    /// 配列はキー順に並べ、出力を決定的にする。
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        let mut books: Vec<Book> = self.books.values().cloned().collect();
        books.sort_by(|a, b| a.isbn.cmp(&b.isbn));

        let mut members: Vec<Member> = self.members.values().cloned().collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));

        CatalogSnapshot {
            name: self.name.clone(),
            books,
            members,
        }
    }

    /// スナップショットからカタログを復元する
    ///
    /// 次を検証し、1つでも満たさなければ復元しない：
    /// - ISBNが正規化済みかつ構文的に有効
    /// - ISBN・会員IDの重複がない
    /// - 書籍の状態と貸出会員IDが一致している
    /// - 書籍側と会員側の貸出情報が双方向に一致している
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self, SnapshotError> {
        let mut catalog = Self::new(snapshot.name);

        for book in snapshot.books {
            if !book.isbn.is_canonical() || !validation::validate_isbn(book.isbn.value()) {
                return Err(SnapshotError::InvalidIsbn(book.isbn));
            }
            if !book.is_consistent() {
                return Err(SnapshotError::InconsistentStatus(book.isbn));
            }
            if catalog.books.contains_key(&book.isbn) {
                return Err(SnapshotError::DuplicateBook(book.isbn));
            }
            catalog.put_book(book);
        }

        for member in snapshot.members {
            if catalog.members.contains_key(&member.id) {
                return Err(SnapshotError::DuplicateMember(member.id));
            }
            catalog.put_member(member);
        }

        catalog.check_checkout_links()?;
        Ok(catalog)
    }

    /// 書籍側と会員側の貸出情報の双方向整合性を検証する
    fn check_checkout_links(&self) -> Result<(), SnapshotError> {
        // 会員側 → 書籍側
        for member in self.members.values() {
            for isbn in &member.books_checked_out {
                let held_by_member = self.books.get(isbn).is_some_and(|book| {
                    book.status == BookStatus::CheckedOut
                        && book.checkout_member_id.as_ref() == Some(&member.id)
                });
                if !held_by_member {
                    return Err(SnapshotError::DanglingHolding {
                        member_id: member.id.clone(),
                        isbn: isbn.clone(),
                    });
                }
            }
        }

        // 書籍側 → 会員側
        for book in self.books.values() {
            let Some(member_id) = &book.checkout_member_id else {
                continue;
            };
            let holds = self
                .members
                .get(member_id)
                .is_some_and(|member| member.holds(&book.isbn));
            if !holds {
                return Err(SnapshotError::OrphanedCheckout {
                    isbn: book.isbn.clone(),
                    member_id: member_id.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckoutLimit, LoanPeriod, circulation::CirculationPolicy};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn policy() -> CirculationPolicy {
        CirculationPolicy::new(CheckoutLimit::try_from(5).unwrap(), LoanPeriod::default())
    }

    /// 書籍2冊・会員2名、うち1冊をm1に貸出中のカタログ
    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new("Alexandrea Main Library");
        let republic = Book::new(Isbn::canonical("9780140449143"), "The Republic", "Plato", 380);
        let investor = Book::new(
            Isbn::canonical("9780060555665"),
            "The Intelligent Investor",
            "Benjamin Graham",
            1949,
        );
        let m1 = Member::new(MemberId::new("m1"), "Ana", "ana@x.com", now());
        let m2 = Member::new(MemberId::new("m2"), "Bo", "bo@x.com", now());

        let (republic, m1, _) = circulation::checkout(&republic, &m1, &policy(), now()).unwrap();

        catalog.put_book(republic);
        catalog.put_book(investor);
        catalog.put_member(m1);
        catalog.put_member(m2);
        catalog
    }

    // エンティティストアのテスト
    #[test]
    fn test_put_and_get_book() {
        let mut catalog = Catalog::new("lib");
        let book = Book::new(Isbn::canonical("0306406152"), "T", "A", 2000);
        catalog.put_book(book.clone());

        assert_eq!(catalog.get_book(&Isbn::canonical("0-306-40615-2")), Some(&book));
        assert_eq!(catalog.book_count(), 1);
    }

    #[test]
    fn test_remove_book() {
        let mut catalog = sample_catalog();
        assert!(catalog.remove_book(&Isbn::canonical("9780060555665")));
        assert!(!catalog.remove_book(&Isbn::canonical("9780060555665")));
        assert_eq!(catalog.book_count(), 1);
    }

    #[test]
    fn test_statistics() {
        let catalog = sample_catalog();

        let stats = catalog.statistics(now());
        assert_eq!(stats.name, "Alexandrea Main Library");
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.total_members, 2);
        assert_eq!(stats.available_books, 1);
        assert_eq!(stats.checked_out_books, 1);
        assert_eq!(stats.overdue_books, 0);

        let later = catalog.statistics(now() + Duration::days(30));
        assert_eq!(later.overdue_books, 1);
    }

    // スナップショットのテスト
    #[test]
    fn test_snapshot_is_sorted_by_key() {
        let snapshot = sample_catalog().to_snapshot();
        let isbns: Vec<&str> = snapshot.books.iter().map(|b| b.isbn.value()).collect();
        assert_eq!(isbns, vec!["9780060555665", "9780140449143"]);
        let ids: Vec<&str> = snapshot.members.iter().map(|m| m.id.value()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_snapshot_restore_is_lossless() {
        let catalog = sample_catalog();
        let restored = Catalog::from_snapshot(catalog.to_snapshot()).unwrap();
        assert_eq!(restored, catalog);
    }

    #[test]
    fn test_snapshot_json_round_trip_is_lossless() {
        let catalog = sample_catalog();
        let json = serde_json::to_string_pretty(&catalog.to_snapshot()).unwrap();
        let snapshot: CatalogSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(Catalog::from_snapshot(snapshot).unwrap(), catalog);
    }

    #[test]
    fn test_restore_rejects_duplicate_books() {
        let mut snapshot = sample_catalog().to_snapshot();
        let duplicate = snapshot.books[0].clone();
        snapshot.books.push(duplicate);

        assert!(matches!(
            Catalog::from_snapshot(snapshot),
            Err(SnapshotError::DuplicateBook(_))
        ));
    }

    #[test]
    fn test_restore_rejects_duplicate_members() {
        let mut snapshot = sample_catalog().to_snapshot();
        let duplicate = snapshot.members[1].clone();
        snapshot.members.push(duplicate);

        assert!(matches!(
            Catalog::from_snapshot(snapshot),
            Err(SnapshotError::DuplicateMember(_))
        ));
    }

    #[test]
    fn test_restore_rejects_non_canonical_isbn() {
        let mut snapshot = sample_catalog().to_snapshot();
        snapshot.books[0].isbn = serde_json::from_str("\"978-0060555665\"").unwrap();

        assert!(matches!(
            Catalog::from_snapshot(snapshot),
            Err(SnapshotError::InvalidIsbn(_))
        ));
    }

    #[test]
    fn test_restore_rejects_dangling_member_holding() {
        let mut snapshot = sample_catalog().to_snapshot();
        // m2が貸出中でない書籍を保持している
        snapshot.members[1]
            .books_checked_out
            .insert(Isbn::canonical("9780060555665"));

        assert!(matches!(
            Catalog::from_snapshot(snapshot),
            Err(SnapshotError::DanglingHolding { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_orphaned_checkout() {
        let mut snapshot = sample_catalog().to_snapshot();
        // m1の貸出一覧から書籍を消す（書籍側は貸出中のまま）
        snapshot.members[0].books_checked_out.clear();

        assert!(matches!(
            Catalog::from_snapshot(snapshot),
            Err(SnapshotError::OrphanedCheckout { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_status_without_holder() {
        let mut snapshot = sample_catalog().to_snapshot();
        snapshot.books[0].status = BookStatus::CheckedOut;

        assert!(matches!(
            Catalog::from_snapshot(snapshot),
            Err(SnapshotError::InconsistentStatus(_))
        ));
    }
}
