//! Process entrypoint: env config, database connect (fatal on failure),
//! route registration, listen on 0.0.0.0:8080.

use axum::Router;
use restaurant_api::{api_routes, common_routes, AppState, DbConfig, MySqlStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("restaurant_api=info,tower_http=info")
            }),
        )
        .init();

    let config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid database configuration");
            std::process::exit(1);
        }
    };

    let store = match MySqlStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };
    let state = AppState::new(Arc::new(store));

    let app = Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(TraceLayer::new_for_http());

    let listener = match TcpListener::bind("0.0.0.0:8080").await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "failed to bind 0.0.0.0:8080");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on 0.0.0.0:8080");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
