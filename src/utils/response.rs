use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body shape for acknowledgements and every error: `{"message": "..."}`.
#[derive(Serialize)]
pub struct ApiMessage {
    pub message: String,
}

/// 200 with a plain `{"message"}` acknowledgement.
pub fn message(text: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiMessage {
            message: text.into(),
        }),
    )
        .into_response()
}

/// 200 with the payload serialized as-is.
pub fn json<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(data)).into_response()
}

pub fn error(message: impl Into<String>, status: StatusCode) -> Response {
    (
        status,
        Json(ApiMessage {
            message: message.into(),
        }),
    )
        .into_response()
}
