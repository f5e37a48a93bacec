use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{error, instrument, warn};

use crate::state::AppState;
use crate::storage::sanitize_filename;

pub fn router() -> Router<AppState> {
    Router::new().route("/uploads/:filename", get(serve_upload))
}

/// GET /uploads/:filename: raw stored bytes. Route params arrive
/// percent-decoded, so the name can contain path separators; anything
/// that is not a plain filename is treated as absent.
#[instrument(skip(state))]
async fn serve_upload(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    if sanitize_filename(&filename).as_deref() != Some(filename.as_str()) {
        warn!(%filename, "upload name is not a plain filename");
        return StatusCode::NOT_FOUND.into_response();
    }
    match state.storage.load(&filename).await {
        Ok(Some(bytes)) => {
            ([(header::CONTENT_TYPE, mime_for(&filename))], bytes).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(error = %e, %filename, "serve upload failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

fn mime_for(name: &str) -> &'static str {
    let ext = std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guess_covers_common_image_types() {
        assert_eq!(mime_for("a.png"), "image/png");
        assert_eq!(mime_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }

    #[test]
    fn mime_guess_ignores_extension_case() {
        assert_eq!(mime_for("photo.JPEG"), "image/jpeg");
        assert_eq!(mime_for("shot.PNG"), "image/png");
    }
}
