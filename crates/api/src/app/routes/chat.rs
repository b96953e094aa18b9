use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// One guest exchange: completion, reconciliation, persistence of any
/// deductions, reply.
pub async fn chat(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ChatRequest>,
) -> axum::response::Response {
    let outcome = match services
        .chat()
        .chat(&body.message, &body.inventory, &body.chat_history)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => return errors::ai_error_to_response(e),
    };

    if let Some(updated) = &outcome.updated_inventory {
        // The guest still gets the reply even if the save fails; the UI holds
        // the updated copy and can re-post it through the inventory write.
        if let Err(error) = services.inventory().save(services.tenant_id(), updated).await {
            tracing::error!(%error, "failed to persist reconciled inventory");
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "response": outcome.response_text,
            "updatedInventory": outcome.updated_inventory,
        })),
    )
        .into_response()
}
