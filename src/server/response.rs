use actix_web::{HttpResponse, http::StatusCode};

/// `{"error": message}` with the given status
pub(crate) fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": message.into(),
    }))
}

/// Log the cause and answer with a generic 500
pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    log::error!("{context}: {err}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
