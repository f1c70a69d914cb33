//! Prediction endpoint: multipart image upload in, classification out.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use plantcare_core::ClassificationResult;
use serde::Serialize;
use tracing::info;

use crate::state::SharedState;

/// Error body returned for failed requests
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An API error with its HTTP status
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// POST /predict - classify an uploaded plant image.
///
/// Expects a multipart form with a `file` field. The upload is processed
/// entirely from memory; nothing is written to disk. The classification
/// itself always succeeds with a structured result, so errors here are
/// strictly about the request shape.
pub async fn predict(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<ClassificationResult>, ApiError> {
    let mut file_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
            file_bytes = Some(bytes);
            break;
        }
    }

    let Some(bytes) = file_bytes else {
        return Err(ApiError::bad_request("No file uploaded"));
    };

    if bytes.len() > state.config.max_upload_bytes {
        return Err(ApiError::bad_request(
            "File too large. Maximum size is 10MB",
        ));
    }

    info!(size = bytes.len(), "received prediction request");

    // The pixel scan is CPU-bound, so keep it off the async workers.
    let analyzer = state.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || analyzer.classify_bytes(&bytes))
        .await
        .map_err(|e| ApiError::internal(format!("Failed to process image: {e}")))?;

    Ok(Json(result))
}
