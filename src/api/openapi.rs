//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Society Visitor API",
        version = "1.0.0",
        description = "Visitor log for residential societies"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Visitors
        visitors::submit_visitor,
        visitors::list_visitors,
        visitors::list_visitors_by_date,
        visitors::list_visitors_by_time,
        visitors::list_visitors_by_block,
        visitors::list_visitors_by_room,
        visitors::list_visitors_by_block_room,
    ),
    components(
        schemas(
            // Visitors
            crate::models::visitor::Visitor,
            crate::models::visitor::SubmitVisitor,
            crate::models::visitor::IntegerInput,
            crate::models::visitor::VisitorPage,
            visitors::SubmitResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "visitors", description = "Visitor log and queries")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
