use crate::application::catalog::{self as catalog, CatalogApplicationError, ServiceDependencies};
use crate::domain::{Isbn, MemberId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, BookResponse, CirculationRequest, MemberResponse, RegisterMemberRequest,
        SearchBooksQuery, SnapshotResponse, StatisticsResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    /// スナップショットの保存先（設定値のみ。クライアントからは指定できない）
    pub snapshot_path: PathBuf,
}

fn books_response(books: Vec<crate::domain::Book>) -> Json<Vec<BookResponse>> {
    Json(books.into_iter().map(BookResponse::from).collect())
}

// ============================================================================
// Command handlers (POST / DELETE)
// ============================================================================

/// POST /books - 書籍をカタログに追加
///
/// 強制されるビジネスルール:
/// - タイトル・著者・ISBNが空でないこと
/// - ISBNが有効な形式であり、既存の書籍と重複しないこと
/// - 出版年が0〜現在の年であること
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let cmd = req.to_command(Utc::now());
    let book = catalog::add_book(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// DELETE /books/:isbn - 書籍をカタログから削除
///
/// 貸出中の書籍は削除できない。
pub async fn remove_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, ApiError> {
    catalog::remove_book(&state.service_deps, &isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /members - 会員を登録
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let cmd = req.to_command(Utc::now());
    let member = catalog::register_member(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// POST /checkouts - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 会員と書籍が存在すること
/// - 書籍が貸出可能であること
/// - 会員の貸出数が上限に達していないこと
pub async fn checkout_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CirculationRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = req.to_checkout(Utc::now());
    let book = catalog::checkout_book(&state.service_deps, cmd).await?;

    Ok(Json(BookResponse::from(book)))
}

/// POST /returns - 書籍を返却
///
/// 借りている本人からの返却のみ受け付ける。延滞中でも返却可能。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CirculationRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = req.to_return(Utc::now());
    let book = catalog::return_book(&state.service_deps, cmd).await?;

    Ok(Json(BookResponse::from(book)))
}

/// POST /snapshot/save - カタログを設定済みの保存先に保存
pub async fn save_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let saved = catalog::save_snapshot(&state.service_deps, &state.snapshot_path).await?;
    Ok(Json(SnapshotResponse::from(saved)))
}

/// POST /snapshot/load - 設定済みの保存先からカタログ全体を置き換える
pub async fn load_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let restored = catalog::load_snapshot(&state.service_deps, &state.snapshot_path).await?;
    Ok(Json(SnapshotResponse::from(restored)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/:isbn - 書籍をISBNで取得
///
/// ハイフンや空白を含むISBNも受け付ける。見つからない場合は404を返す。
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = catalog::get_book(&state.service_deps, &isbn)
        .await
        .ok_or_else(|| CatalogApplicationError::BookNotFound(Isbn::canonical(&isbn)))?;

    Ok(Json(BookResponse::from(book)))
}

/// GET /members/:id - 会員をIDで取得
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = catalog::get_member(&state.service_deps, &id)
        .await
        .ok_or_else(|| CatalogApplicationError::MemberNotFound(MemberId::new(id)))?;

    Ok(Json(MemberResponse::from(member)))
}

/// GET /books - 書籍検索
///
/// クエリパラメータ（すべて任意、指定されたもののAND）:
/// - q: タイトルまたは著者の部分一致
/// - title, author: 部分一致（大文字小文字を区別しない）
/// - year_from, year_to: 出版年の範囲（両端を含む）
/// - status: available / checked_out（不正な値は無視）
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchBooksQuery>,
) -> Json<Vec<BookResponse>> {
    let books = catalog::search_books(&state.service_deps, query.to_command()).await;
    books_response(books)
}

/// GET /books/available - 貸出可能な書籍の一覧
pub async fn get_available_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookResponse>> {
    books_response(catalog::get_available_books(&state.service_deps).await)
}

/// GET /books/overdue - 延滞中の書籍の一覧
pub async fn get_overdue_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookResponse>> {
    books_response(catalog::get_overdue_books(&state.service_deps, Utc::now()).await)
}

/// GET /stats - カタログの統計
pub async fn catalog_statistics(State(state): State<Arc<AppState>>) -> Json<StatisticsResponse> {
    let stats = catalog::catalog_statistics(&state.service_deps, Utc::now()).await;
    Json(StatisticsResponse::from(stats))
}
