use crate::application::catalog::CatalogApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(CatalogApplicationError);

impl From<CatalogApplicationError> for ApiError {
    fn from(err: CatalogApplicationError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    /// ステータスコードとエラー種別
    fn classify(&self) -> (StatusCode, &'static str) {
        match self.0 {
            // 400 Bad Request - 入力値の検証エラー
            CatalogApplicationError::EmptyField(_) => (StatusCode::BAD_REQUEST, "EMPTY_FIELD"),
            CatalogApplicationError::InvalidIsbn(_) => (StatusCode::BAD_REQUEST, "INVALID_ISBN"),
            CatalogApplicationError::InvalidEmail(_) => (StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
            CatalogApplicationError::InvalidYear(_) => (StatusCode::BAD_REQUEST, "INVALID_YEAR"),

            // 404 Not Found - リクエストされたリソースが存在しない
            CatalogApplicationError::BookNotFound(_) => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND"),
            CatalogApplicationError::MemberNotFound(_) => {
                (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND")
            }

            // 409 Conflict - 現在の状態と矛盾する
            CatalogApplicationError::DuplicateBook(_) => (StatusCode::CONFLICT, "DUPLICATE_BOOK"),
            CatalogApplicationError::DuplicateMember(_) => {
                (StatusCode::CONFLICT, "DUPLICATE_MEMBER")
            }
            CatalogApplicationError::CheckoutError(_) => (StatusCode::CONFLICT, "CHECKOUT_ERROR"),
            CatalogApplicationError::ReturnError(_) => (StatusCode::CONFLICT, "RETURN_ERROR"),

            // 500 Internal Server Error - システム障害
            CatalogApplicationError::PersistenceError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.classify();

        let message = match &self.0 {
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            CatalogApplicationError::PersistenceError(e) => {
                tracing::error!("Persistence error: {}", e);
                "Failed to access catalog snapshot".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
