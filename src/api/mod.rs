//! API handlers and router for the visitor REST endpoints

pub mod health;
pub mod openapi;
pub mod visitors;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let visitor_routes = Router::new()
        .route("/submit", post(visitors::submit_visitor))
        .route("/all", get(visitors::list_visitors))
        .route("/dates/:date", get(visitors::list_visitors_by_date))
        .route("/time/:date/:from/:to", get(visitors::list_visitors_by_time))
        .route("/block/:block", get(visitors::list_visitors_by_block))
        .route("/block/:block/room/:room_no", get(visitors::list_visitors_by_block_room))
        .route("/room/:room_no", get(visitors::list_visitors_by_room));

    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/visitor", visitor_routes)
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    app.merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
