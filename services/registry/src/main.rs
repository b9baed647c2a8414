use sea_orm::Database;
use tracing::info;

use rito_registry::config::RegistryConfig;
use rito_registry::infra::geoip::HttpGeoLookup;
use rito_registry::router::build_router;
use rito_registry::state::AppState;

#[tokio::main]
async fn main() {
    rito_core::tracing::init_tracing();

    let config = RegistryConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        geo: HttpGeoLookup::new(&config.geoip_base_url),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.registry_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("registry service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
