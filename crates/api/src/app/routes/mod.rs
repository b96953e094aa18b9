use axum::{
    Router,
    routing::{get, post},
};

pub mod chat;
pub mod inventory;
pub mod menu;
pub mod system;

/// Router for every endpoint except the `/health` probe.
pub fn router() -> Router {
    Router::new()
        .route(
            "/inventory",
            get(inventory::get_inventory).post(inventory::put_inventory),
        )
        .route("/enrich-inventory", post(inventory::enrich_inventory))
        .route("/chat", post(chat::chat))
        .route("/menu", get(menu::get_live))
        .route("/menu/admin", get(menu::get_admin))
        .route("/menu/draft", post(menu::save_draft))
        .route("/menu/publish", post(menu::publish))
        .route("/menu/rollback/:version", post(menu::rollback))
        .route("/menu/snapshots", get(menu::snapshots))
        .route("/menu/add", post(menu::add_recipe))
        .route("/menu/discard-draft", post(menu::discard_draft))
}
