use actix_web::{web, App, HttpServer};
use anyhow::Result;
use cluster_balance::{
    api::{cluster_routes, ApiState},
    DiscoveryService, GraphIndexer,
};
use tracing_subscriber::EnvFilter;

mod config;

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::load()?;
    let bind = config::bind_address();
    let state = web::Data::new(ApiState {
        service: DiscoveryService::from_config(&config)?,
        networks: config.networks.clone(),
    });

    tracing::info!(%bind, "Starting balance_server service");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(cluster_routes::<GraphIndexer>())
    })
    .bind(&bind)?
    .run()
    .await?;

    Ok(())
}
