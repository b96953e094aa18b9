use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;

use barkeep_inventory::all_ingredients_in_stock;
use barkeep_menu::{AddRecipeOutcome, Menu, MenuItemStatus, Recipe};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn get_live(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };
    (StatusCode::OK, Json(json!({ "items": menu.live() }))).into_response()
}

/// Editor view: the draft when one exists, else the live menu.
pub async fn get_admin(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };
    let (source, items) = menu.admin_view();
    (
        StatusCode::OK,
        Json(json!({ "source": source, "items": items })),
    )
        .into_response()
}

pub async fn save_draft(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::DraftRequest>,
) -> axum::response::Response {
    let mut menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };
    menu.save_draft(body.items);

    if let Err(resp) = store_menu(&services, &menu).await {
        return resp;
    }
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

pub async fn publish(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PublishRequest>,
) -> axum::response::Response {
    let mut menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };

    let version = match menu.publish(body.items, body.version, Utc::now()) {
        Ok(version) => version,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(resp) = store_menu(&services, &menu).await {
        return resp;
    }
    (StatusCode::OK, Json(json!({ "version": version }))).into_response()
}

pub async fn rollback(
    Extension(services): Extension<Arc<AppServices>>,
    Path(version): Path<u64>,
) -> axum::response::Response {
    let mut menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };

    if let Err(e) = menu.rollback(version, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    if let Err(resp) = store_menu(&services, &menu).await {
        return resp;
    }
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

pub async fn snapshots(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };
    let summaries: Vec<dto::SnapshotSummary> =
        menu.snapshots_desc().map(dto::SnapshotSummary::from).collect();
    (StatusCode::OK, Json(json!({ "snapshots": summaries }))).into_response()
}

/// Put a favorite recipe onto the working menu. Availability is judged
/// against the stored inventory, not anything the client sends.
pub async fn add_recipe(
    Extension(services): Extension<Arc<AppServices>>,
    Json(recipe): Json<Recipe>,
) -> axum::response::Response {
    let tenant_id = services.tenant_id();

    let inventory = match services.inventory().load(tenant_id).await {
        Ok(inventory) => inventory,
        Err(e) => return errors::kv_error_to_response(e),
    };
    let status = if all_ingredients_in_stock(&recipe.ingredients, &inventory) {
        MenuItemStatus::Active
    } else {
        MenuItemStatus::TemporarilyUnavailable
    };

    let mut menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };

    match menu.add_recipe(recipe, status) {
        AddRecipeOutcome::Added(item) => {
            if let Err(resp) = store_menu(&services, &menu).await {
                return resp;
            }
            (
                StatusCode::OK,
                Json(json!({ "added": true, "item": item })),
            )
                .into_response()
        }
        AddRecipeOutcome::AlreadyOnMenu => (
            StatusCode::OK,
            Json(json!({ "added": false, "reason": "already_on_menu" })),
        )
            .into_response(),
    }
}

pub async fn discard_draft(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let mut menu = match load_menu(&services).await {
        Ok(menu) => menu,
        Err(resp) => return resp,
    };
    menu.discard_draft();

    if let Err(resp) = store_menu(&services, &menu).await {
        return resp;
    }
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

async fn load_menu(services: &AppServices) -> Result<Menu, axum::response::Response> {
    services
        .menu()
        .load(services.tenant_id())
        .await
        .map_err(errors::kv_error_to_response)
}

async fn store_menu(
    services: &AppServices,
    menu: &Menu,
) -> Result<(), axum::response::Response> {
    services
        .menu()
        .save(services.tenant_id(), menu)
        .await
        .map_err(errors::kv_error_to_response)
}
