use std::sync::Arc;

use barkeep_ai::{AnthropicClient, CompletionClient, MockCompletionClient};
use barkeep_api::app::services::AppServices;
use barkeep_core::TenantId;
use barkeep_infra::InMemoryKvStore;
use barkeep_inventory::UPDATE_MARKER;
use reqwest::StatusCode;
use serde_json::{Value, json};

const TEST_PIN: &str = "7777";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the same router as prod, bound to an ephemeral port, with the
    /// given completion backend behind it.
    async fn spawn(client: Arc<dyn CompletionClient>) -> Self {
        let services =
            AppServices::new(TenantId::new(), TEST_PIN.to_string(), InMemoryKvStore::arc(), client)
                .arc();
        let app = barkeep_api::app::build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn scripted(mock: MockCompletionClient) -> Arc<dyn CompletionClient> {
    Arc::new(mock)
}

fn bottle(name: &str, kind: &str, remaining: &str) -> Value {
    json!({
        "name": name,
        "type": kind,
        "proof": "80",
        "bottleSizeMl": "750",
        "amountRemaining": remaining,
        "flavorNotes": "",
    })
}

fn menu_item(favorite_id: &str, name: &str, spirit: &str) -> Value {
    json!({
        "id": format!("menu-{favorite_id}"),
        "favoriteId": favorite_id,
        "name": name,
        "description": "",
        "primarySpirit": spirit,
        "tags": [],
        "status": "active",
        "version": 1,
    })
}

async fn seed_inventory(client: &reqwest::Client, base_url: &str, inventory: Value) {
    let res = client
        .post(format!("{base_url}/inventory"))
        .header("x-admin-pin", TEST_PIN)
        .json(&json!({ "inventory": inventory }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_answers_ok() {
    let srv = TestServer::spawn(scripted(MockCompletionClient::new())).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn preflight_gets_permissive_cors() {
    let srv = TestServer::spawn(scripted(MockCompletionClient::new())).await;

    let client = reqwest::Client::new();
    let res = client
        .request(reqwest::Method::OPTIONS, format!("{}/inventory", srv.base_url))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn inventory_write_requires_the_pin() {
    let srv = TestServer::spawn(scripted(MockCompletionClient::new())).await;
    let client = reqwest::Client::new();
    let body = json!({ "inventory": [bottle("Campari", "Liqueur", "400")] });

    let res = client
        .post(format!("{}/inventory", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/inventory", srv.base_url))
        .header("x-admin-pin", "wrong")
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "forbidden");

    let res = client
        .post(format!("{}/inventory", srv.base_url))
        .header("x-admin-pin", TEST_PIN)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let ok: Value = res.json().await.unwrap();
    assert_eq!(ok["success"], true);

    let listed: Value = reqwest::get(format!("{}/inventory", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["inventory"][0]["name"], "Campari");
}

#[tokio::test]
async fn fresh_server_reads_an_empty_inventory() {
    let srv = TestServer::spawn(scripted(MockCompletionClient::new())).await;

    let listed: Value = reqwest::get(format!("{}/inventory", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["inventory"], json!([]));
}

#[tokio::test]
async fn chat_strips_the_directive_and_persists_deductions() {
    let reply = format!(
        "Coming right up! {UPDATE_MARKER}{{\"updates\":[{{\"name\":\"Whiskey\",\"subtract\":60}}]}}"
    );
    let mock = MockCompletionClient::new().with_response(reply);
    let srv = TestServer::spawn(scripted(mock.clone())).await;
    let client = reqwest::Client::new();

    seed_inventory(&client, &srv.base_url, json!([bottle("Bourbon Whiskey", "Whiskey", "750")]))
        .await;

    let res = client
        .post(format!("{}/chat", srv.base_url))
        .json(&json!({
            "message": "a whiskey sour please",
            "inventory": [bottle("Bourbon Whiskey", "Whiskey", "750")],
            "chatHistory": [],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["response"], "Coming right up! ");
    assert_eq!(body["updatedInventory"][0]["amountRemaining"], "690");

    // The deduction is visible on the next read.
    let listed: Value = reqwest::get(format!("{}/inventory", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["inventory"][0]["amountRemaining"], "690");

    // The model saw the stock listing and the guest message.
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].system.contains("Bourbon Whiskey"));
    assert_eq!(requests[0].messages.last().unwrap().content, "a whiskey sour please");
}

#[tokio::test]
async fn plain_chat_reply_reports_no_updates() {
    let mock = MockCompletionClient::new().with_response("How about a Negroni?");
    let srv = TestServer::spawn(scripted(mock)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/chat", srv.base_url))
        .json(&json!({
            "message": "something bitter",
            "inventory": [bottle("Campari", "Liqueur", "400")],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["response"], "How about a Negroni?");
    assert!(body["updatedInventory"].is_null());
}

#[tokio::test]
async fn upstream_failure_surfaces_as_a_generic_500() {
    let mock = MockCompletionClient::new().with_failure(503);
    let srv = TestServer::spawn(scripted(mock)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/chat", srv.base_url))
        .json(&json!({ "message": "hello", "inventory": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "ai_unavailable");
    assert_eq!(body["message"], "AI service unavailable");
}

#[tokio::test]
async fn enrichment_fills_notes_but_persists_nothing() {
    let mock = MockCompletionClient::new().with_response("Bitter orange and gentian.");
    let srv = TestServer::spawn(scripted(mock)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/enrich-inventory", srv.base_url))
        .json(&json!({ "inventory": [bottle("Campari", "Liqueur", "400")] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["inventory"][0]["flavorNotes"], "Bitter orange and gentian.");

    let listed: Value = reqwest::get(format!("{}/inventory", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["inventory"], json!([]));
}

#[tokio::test]
async fn menu_lifecycle_draft_publish_conflict_rollback() {
    let srv = TestServer::spawn(scripted(MockCompletionClient::new())).await;
    let client = reqwest::Client::new();
    let gimlet = menu_item("7", "Gimlet", "gin");
    let mojito = menu_item("8", "Mojito", "rum");

    // A draft is invisible to the public menu.
    let res = client
        .post(format!("{}/menu/draft", srv.base_url))
        .json(&json!({ "items": [gimlet] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let live: Value = reqwest::get(format!("{}/menu", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(live["items"], json!([]));

    let admin: Value = reqwest::get(format!("{}/menu/admin", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin["source"], "draft");
    assert_eq!(admin["items"][0]["name"], "Gimlet");

    // First publish moves live to version 1 and clears the draft.
    let res = client
        .post(format!("{}/menu/publish", srv.base_url))
        .json(&json!({ "items": [gimlet], "version": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["version"], 1);

    let admin: Value = reqwest::get(format!("{}/menu/admin", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin["source"], "live");

    // A publish against a stale version is rejected and changes nothing.
    let res = client
        .post(format!("{}/menu/publish", srv.base_url))
        .json(&json!({ "items": [mojito], "version": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "version_conflict");

    let live: Value = reqwest::get(format!("{}/menu", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(live["items"].as_array().unwrap().len(), 1);
    assert_eq!(live["items"][0]["name"], "Gimlet");

    // Second publish with the right version lands at 2.
    let res = client
        .post(format!("{}/menu/publish", srv.base_url))
        .json(&json!({ "items": [gimlet, mojito], "version": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["version"], 2);

    // Rollback restores version 1's content as a new version 3.
    let res = client
        .post(format!("{}/menu/rollback/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let live: Value = reqwest::get(format!("{}/menu", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(live["items"].as_array().unwrap().len(), 1);
    assert_eq!(live["items"][0]["name"], "Gimlet");

    let history: Value = reqwest::get(format!("{}/menu/snapshots", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let versions: Vec<u64> = history["snapshots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["version"].as_u64().unwrap())
        .collect();
    assert_eq!(versions, vec![3, 2, 1]);
    assert!(history["snapshots"][0]["updatedAt"].is_string());
    assert!(history["snapshots"][0].get("items").is_none());

    // Rolling back to a version that never existed is a 404.
    let res = client
        .post(format!("{}/menu/rollback/99", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn adding_recipes_builds_a_draft_with_availability() {
    let srv = TestServer::spawn(scripted(MockCompletionClient::new())).await;
    let client = reqwest::Client::new();

    seed_inventory(&client, &srv.base_url, json!([bottle("Plymouth Gin", "Gin", "700")])).await;

    let res = client
        .post(format!("{}/menu/add", srv.base_url))
        .json(&json!({
            "favoriteId": "11",
            "name": "Gimlet",
            "primarySpirit": "gin",
            "ingredients": ["gin"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["added"], true);
    assert_eq!(body["item"]["id"], "menu-11");
    assert_eq!(body["item"]["status"], "active");

    // Same favorite again: signalled, not an error, and nothing changes.
    let res = client
        .post(format!("{}/menu/add", srv.base_url))
        .json(&json!({
            "favoriteId": "11",
            "name": "Gimlet",
            "primarySpirit": "gin",
            "ingredients": ["gin"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["added"], false);
    assert_eq!(body["reason"], "already_on_menu");

    // An ingredient with no stock marks the item temporarily unavailable.
    let res = client
        .post(format!("{}/menu/add", srv.base_url))
        .json(&json!({
            "favoriteId": "12",
            "name": "Mojito",
            "primarySpirit": "rum",
            "ingredients": ["rum", "mint"],
        }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["added"], true);
    assert_eq!(body["item"]["status"], "temporarily_unavailable");

    let admin: Value = reqwest::get(format!("{}/menu/admin", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin["source"], "draft");
    let names: Vec<&str> = admin["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gimlet", "Mojito"]);

    // Discarding the draft falls back to the (empty) live menu.
    let res = client
        .post(format!("{}/menu/discard-draft", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let admin: Value = reqwest::get(format!("{}/menu/admin", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin["source"], "live");
    assert_eq!(admin["items"], json!([]));
}

#[tokio::test]
async fn chat_round_trips_through_the_anthropic_wire_shape() {
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let upstream = MockServer::start().await;
    let reply = format!(
        "Pouring now. {UPDATE_MARKER}{{\"updates\":[{{\"name\":\"Gin\",\"subtract\":50}}]}}"
    );
    Mock::given(method("POST"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": reply}]
        })))
        .mount(&upstream)
        .await;

    let client_impl = AnthropicClient::with_base_url("test-key", "claude-test", upstream.uri());
    let srv = TestServer::spawn(Arc::new(client_impl)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/chat", srv.base_url))
        .json(&json!({
            "message": "gin and tonic please",
            "inventory": [bottle("Plymouth Gin", "Gin", "700")],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["response"], "Pouring now. ");
    assert_eq!(body["updatedInventory"][0]["amountRemaining"], "650");
}
