use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, catalog_statistics, checkout_book, get_available_books, get_book,
    get_member, get_overdue_books, load_snapshot, register_member, remove_book, return_book,
    save_snapshot, search_books,
};

/// Creates the API router with all catalog endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Add a book
/// - DELETE /books/:isbn - Remove a book
/// - POST /members - Register a member
/// - POST /checkouts - Check out a book
/// - POST /returns - Return a book
/// - POST /snapshot/save, POST /snapshot/load - Persist or restore the whole catalog
///
/// Query endpoints (Read operations):
/// - GET /books - Search books
/// - GET /books/available, GET /books/overdue
/// - GET /books/:isbn, GET /members/:id
/// - GET /stats - Catalog statistics
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Books
        .route("/books", post(add_book).get(search_books))
        .route("/books/available", get(get_available_books))
        .route("/books/overdue", get(get_overdue_books))
        .route("/books/:isbn", get(get_book).delete(remove_book))
        // Members
        .route("/members", post(register_member))
        .route("/members/:id", get(get_member))
        // Circulation
        .route("/checkouts", post(checkout_book))
        .route("/returns", post(return_book))
        // Statistics and persistence
        .route("/stats", get(catalog_statistics))
        .route("/snapshot/save", post(save_snapshot))
        .route("/snapshot/load", post(load_snapshot))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
