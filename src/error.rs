use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures a handler can surface. Infrastructure variants collapse to a
/// generic 500 with the detail kept server-side; the two client-visible
/// outcomes keep their distinct statuses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("hash error: {0}")]
    Hash(String),
    #[error("upload error: {0}")]
    Upload(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "User not found" })),
            )
                .into_response(),
            Self::WrongPassword => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "status": "false" }))).into_response()
            }
            Self::Store(err) => {
                error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            Self::Hash(err) => {
                error!(error = %err, "password hashing error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            Self::Upload(err) => {
                error!(error = %err, "upload error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn not_found_maps_to_404_with_message() {
        let resp = ApiError::UserNotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v, json!({ "message": "User not found" }));
    }

    #[tokio::test]
    async fn wrong_password_maps_to_401_with_status_false() {
        let resp = ApiError::WrongPassword.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v, json!({ "status": "false" }));
    }

    #[tokio::test]
    async fn infrastructure_errors_map_to_generic_500() {
        for err in [
            ApiError::Store(sqlx::Error::PoolTimedOut),
            ApiError::Hash("argon2 exploded".into()),
            ApiError::Upload("disk full".into()),
        ] {
            let resp = err.into_response();
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = resp.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&body[..], b"Internal Server Error");
        }
    }
}
