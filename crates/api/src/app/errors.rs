use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use barkeep_ai::AiError;
use barkeep_core::DomainError;
use barkeep_infra::KvError;

/// Map a domain failure onto the wire. Messages here are user-facing.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "version_conflict", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
    }
}

/// Upstream AI failures all look the same to the guest; detail goes to the
/// server log only.
pub fn ai_error_to_response(err: AiError) -> axum::response::Response {
    tracing::error!(error = %err, "completion request failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "ai_unavailable",
        "AI service unavailable",
    )
}

pub fn kv_error_to_response(err: KvError) -> axum::response::Response {
    tracing::error!(error = %err, "key-value store operation failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        "storage unavailable",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
