pub mod health;
pub mod pages;
pub mod specs;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        pages::sensor_page,
        pages::demo_page,
        specs::readings_spec,
        specs::resolved_readings_spec,
        specs::energy_stats_spec,
    ),
    components(
        schemas(
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "pages", description = "HTML pages with embedded charts"),
        (name = "specs", description = "Generated Vega-Lite chart specifications"),
    ),
    info(
        title = "Sensor Charts",
        description = "Multi-panel charts for sensor telemetry and energy stats",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    tracing::info!(
        window_days = state.config.readings_window_days,
        panel_width = state.config.panel_width,
        data_api = %state.config.data_api_base_url,
        "Chart defaults configured"
    );

    let page_routes = Router::new()
        .route("/sensor/{id}", get(pages::sensor_page))
        .route("/demo", get(pages::demo_page));

    let spec_routes = Router::new()
        .route("/sensor/{id}/readings", get(specs::readings_spec))
        .route(
            "/sensor/{id}/readings/resolved",
            get(specs::resolved_readings_spec),
        )
        .route("/sensor/{id}/energy_stats", get(specs::energy_stats_spec))
        .layer(RequestBodyLimitLayer::new(64 * 1024));

    // Health check routes
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(page_routes)
        .nest("/specs", spec_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
