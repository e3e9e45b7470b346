use crate::handlers::{
    callbacks::post_callback,
    charts::{get_box_plot, get_box_plot_stats, get_county_chart, get_state_chart},
    health::health_check,
    layout::{get_layout, get_months},
    options::{get_counties, get_states},
    page::index,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(index))
        // Health check
        .route("/health", get(health_check))
        // Page description
        .route("/api/v1/layout", get(get_layout))
        .route("/api/v1/months", get(get_months))
        // Dropdown options
        .route("/api/v1/states", get(get_states))
        .route("/api/v1/counties", get(get_counties))
        // Chart figures
        .route("/api/v1/charts/boxplot", get(get_box_plot))
        .route("/api/v1/charts/state", get(get_state_chart))
        .route("/api/v1/charts/county", get(get_county_chart))
        .route("/api/v1/stats/boxplot", get(get_box_plot_stats))
        // UI events
        .route("/api/v1/callbacks", post(post_callback))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
