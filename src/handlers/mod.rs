use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::response::json;

pub mod contacts;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "agenda-api",
    };

    json(payload).into_response()
}
