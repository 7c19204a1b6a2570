use chrono::{DateTime, Utc};

use crate::domain::{
    self, Book, BookStatus, CatalogStatistics, commands::SearchBooks, search::BookFilter,
};

use super::catalog_service::ServiceDependencies;

/// 表示順（タイトル → ISBN）に並べる
fn sorted(mut books: Vec<Book>) -> Vec<Book> {
    books.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.isbn.cmp(&b.isbn)));
    books
}

/// 書籍を検索する
///
/// 指定された条件すべてを満たす書籍を返す。
/// 解釈できない`status`はエラーにせず、警告を出してその条件だけを無視する。
pub async fn search_books(deps: &ServiceDependencies, query: SearchBooks) -> Vec<Book> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<BookStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(status = raw, "Ignoring status filter: {}", e);
                None
            }
        },
    };

    let filter = BookFilter::default()
        .query(query.query.as_deref())
        .title(query.title.as_deref())
        .author(query.author.as_deref())
        .year_range(query.year_from, query.year_to)
        .status(status);

    let catalog = deps.catalog.lock().await;
    let books = catalog
        .books()
        .filter(|book| filter.matches(book))
        .cloned()
        .collect();
    drop(catalog);

    sorted(books)
}

/// 貸出可能な書籍の一覧
pub async fn get_available_books(deps: &ServiceDependencies) -> Vec<Book> {
    let catalog = deps.catalog.lock().await;
    let books = catalog
        .books()
        .filter(|book| book.is_available())
        .cloned()
        .collect();
    drop(catalog);

    sorted(books)
}

/// 延滞中の書籍の一覧（返却期限 < now）
pub async fn get_overdue_books(deps: &ServiceDependencies, now: DateTime<Utc>) -> Vec<Book> {
    let catalog = deps.catalog.lock().await;
    let books = catalog
        .books()
        .filter(|book| domain::circulation::is_overdue(book, now))
        .cloned()
        .collect();
    drop(catalog);

    sorted(books)
}

/// カタログの統計
pub async fn catalog_statistics(
    deps: &ServiceDependencies,
    now: DateTime<Utc>,
) -> CatalogStatistics {
    deps.catalog.lock().await.statistics(now)
}
