use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::auth;

pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory().load(services.tenant_id()).await {
        Ok(inventory) => {
            (StatusCode::OK, Json(json!({ "inventory": inventory }))).into_response()
        }
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn put_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::InventoryUpload>,
) -> axum::response::Response {
    if let Err(e) = auth::require_admin_pin(&headers, services.admin_pin()) {
        return errors::domain_error_to_response(e);
    }

    match services
        .inventory()
        .save(services.tenant_id(), &body.inventory)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => errors::kv_error_to_response(e),
    }
}

/// Fill missing flavor notes on the submitted list. Persists nothing; the
/// caller reviews the result and saves it through the protected write.
pub async fn enrich_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::InventoryUpload>,
) -> axum::response::Response {
    let enriched = services.enricher().enrich(body.inventory).await;
    (StatusCode::OK, Json(json!({ "inventory": enriched }))).into_response()
}
