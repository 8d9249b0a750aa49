//! Request extractors whose rejections use the API error body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::handlers::ErrorResponse;

/// `Json` extractor answering malformed bodies with `{"detail": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiRejection))]
pub struct ApiJson<T>(pub T);

/// `Path` extractor answering malformed parameters with `{"detail": ...}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiRejection))]
pub struct ApiPath<T>(pub T);

/// Rejected request input.
///
/// Malformed input is a validation failure (422); other statuses such as
/// 415 for a missing content type are kept.
#[derive(Debug)]
pub struct ApiRejection {
    status: StatusCode,
    detail: String,
}

impl ApiRejection {
    fn new(status: StatusCode, detail: String) -> Self {
        let status = if status == StatusCode::BAD_REQUEST {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            status
        };
        debug!(status = %status, "rejected request input: {}", detail);
        Self { status, detail }
    }

    /// Status returned to the client.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<JsonRejection> for ApiRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiRejection {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_becomes_validation_failure() {
        let rejection = ApiRejection::new(StatusCode::BAD_REQUEST, "bad".to_string());
        assert_eq!(rejection.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn other_statuses_are_kept() {
        let rejection = ApiRejection::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "type".to_string());
        assert_eq!(rejection.into_response().status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
