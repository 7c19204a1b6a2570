use super::{Book, BookStatus};

/// 書籍検索フィルタ
///
/// 文字列条件は小文字化済みで保持し、大文字小文字を区別しない部分一致で判定する。
/// 年の範囲は両端を含む。すべての条件のANDを取る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    query: Option<String>,
    title: Option<String>,
    author: Option<String>,
    year_from: Option<i32>,
    year_to: Option<i32>,
    status: Option<BookStatus>,
}

/// 空文字列は「指定なし」として扱う
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

impl BookFilter {
    /// タイトルまたは著者
    pub fn query(mut self, query: Option<&str>) -> Self {
        self.query = normalize(query);
        self
    }

    pub fn title(mut self, title: Option<&str>) -> Self {
        self.title = normalize(title);
        self
    }

    pub fn author(mut self, author: Option<&str>) -> Self {
        self.author = normalize(author);
        self
    }

    pub fn year_range(mut self, year_from: Option<i32>, year_to: Option<i32>) -> Self {
        self.year_from = year_from;
        self.year_to = year_to;
        self
    }

    pub fn status(mut self, status: Option<BookStatus>) -> Self {
        self.status = status;
        self
    }

    /// 純粋関数：書籍が全条件を満たすか
    pub fn matches(&self, book: &Book) -> bool {
        let title = book.title.to_lowercase();
        let author = book.author.to_lowercase();

        if let Some(q) = &self.query {
            if !title.contains(q.as_str()) && !author.contains(q.as_str()) {
                return false;
            }
        }
        if self.title.as_ref().is_some_and(|t| !title.contains(t.as_str())) {
            return false;
        }
        if self.author.as_ref().is_some_and(|a| !author.contains(a.as_str())) {
            return false;
        }
        if self.year_from.is_some_and(|from| book.publication_year < from) {
            return false;
        }
        if self.year_to.is_some_and(|to| book.publication_year > to) {
            return false;
        }
        if self.status.is_some_and(|status| book.status != status) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Isbn, MemberId};

    fn republic() -> Book {
        Book::new(Isbn::canonical("9780140449143"), "The Republic", "Plato", 380)
    }

    fn meditations() -> Book {
        let mut book = Book::new(
            Isbn::canonical("9780812968255"),
            "Meditations",
            "Marcus Aurelius",
            180,
        );
        book.status = BookStatus::CheckedOut;
        book.checkout_member_id = Some(MemberId::new("m1"));
        book
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = BookFilter::default();
        assert!(filter.matches(&republic()));
        assert!(filter.matches(&meditations()));
    }

    #[test]
    fn test_query_matches_title_or_author_case_insensitively() {
        let filter = BookFilter::default().query(Some("PLATO"));
        assert!(filter.matches(&republic()));
        assert!(!filter.matches(&meditations()));

        let filter = BookFilter::default().query(Some("medit"));
        assert!(filter.matches(&meditations()));
    }

    #[test]
    fn test_title_filter_ignores_author() {
        let filter = BookFilter::default().title(Some("plato"));
        assert!(!filter.matches(&republic()));
    }

    #[test]
    fn test_author_filter_ignores_title() {
        let filter = BookFilter::default().author(Some("republic"));
        assert!(!filter.matches(&republic()));

        let filter = BookFilter::default().author(Some("aurel"));
        assert!(filter.matches(&meditations()));
    }

    #[test]
    fn test_blank_strings_are_not_filters() {
        let filter = BookFilter::default().query(Some("  ")).title(Some(""));
        assert_eq!(filter, BookFilter::default());
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let filter = BookFilter::default().year_range(Some(180), Some(380));
        assert!(filter.matches(&republic()));
        assert!(filter.matches(&meditations()));

        let filter = BookFilter::default().year_range(Some(181), None);
        assert!(filter.matches(&republic()));
        assert!(!filter.matches(&meditations()));

        let filter = BookFilter::default().year_range(None, Some(379));
        assert!(!filter.matches(&republic()));
    }

    #[test]
    fn test_status_filter_is_exact() {
        let filter = BookFilter::default().status(Some(BookStatus::Available));
        assert!(filter.matches(&republic()));
        assert!(!filter.matches(&meditations()));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let filter = BookFilter::default()
            .query(Some("marcus"))
            .status(Some(BookStatus::Available));
        assert!(!filter.matches(&meditations()));
    }
}
