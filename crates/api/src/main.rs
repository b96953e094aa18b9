#[tokio::main]
async fn main() {
    barkeep_observability::init();

    let config = barkeep_api::config::Config::from_env();
    let services = barkeep_api::app::services::AppServices::from_config(&config).arc();
    let app = barkeep_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
