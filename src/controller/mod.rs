use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::google_places_repo::{GooglePlacesRepo, PlacesApi};

pub mod google_places_api;
pub mod health_check;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub places_repo: Arc<dyn PlacesApi>,
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let port = SocketAddr::from(([0, 0, 0, 0], config.server_port));

    let app_state = AppState {
        config: Arc::new(config),
        places_repo: Arc::new(GooglePlacesRepo::new()?),
    };

    let application = application(app_state);

    info!("API server listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

/// The fully assembled service: routes, CORS, compression and the 404
/// fallback. Split out from `serve` so it can be exercised without binding
/// a socket.
pub fn application(app_state: AppState) -> Router {
    let origins: Vec<HeaderValue> = app_state
        .config
        .origin_urls
        .split(',')
        .map(|s| s.parse().unwrap())
        .collect::<Vec<HeaderValue>>();

    router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::OPTIONS])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
                .layer(CompressionLayer::new())
        )
        .fallback(page_not_found_handler)
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router()
        .nest("/api", google_places_api::router(app_state))
}
