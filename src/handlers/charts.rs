use axum::{
    extract::State,
    response::Json,
};
use common::{ApiResponse, BoxPlotStats, Figure};
use compute::charts::{box_plot_figure, county_forecast_figure, state_forecast_figure};
use compute::views::month_distributions;
use tracing::{debug, instrument};
use crate::schemas::{ApiQuery, ApiResult, AppState, BoxPlotQuery, CountyQuery, ErrorResponse, StateQuery};

/// Box plot of density per state for one slider position
#[utoipa::path(
    get,
    path = "/api/v1/charts/boxplot",
    tag = "charts",
    params(BoxPlotQuery),
    responses(
        (status = 200, description = "Box plot built successfully", body = ApiResponse<Figure>),
        (status = 400, description = "Missing or invalid position", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_box_plot(
    ApiQuery(query): ApiQuery<BoxPlotQuery>,
    State(state): State<AppState>,
) -> ApiResult<Figure> {
    let figure = box_plot_figure(&state.context, query.position)?;
    debug!("Box plot has {} traces", figure.trace_count());

    Ok(Json(ApiResponse::ok(figure, "Box plot built successfully")))
}

/// Five-number summaries behind the box plot
#[utoipa::path(
    get,
    path = "/api/v1/stats/boxplot",
    tag = "charts",
    params(BoxPlotQuery),
    responses(
        (status = 200, description = "Box plot statistics computed successfully", body = ApiResponse<BoxPlotStats>),
        (status = 400, description = "Missing or invalid position", body = ErrorResponse),
    )
)]
#[instrument(skip(state))]
pub async fn get_box_plot_stats(
    ApiQuery(query): ApiQuery<BoxPlotQuery>,
    State(state): State<AppState>,
) -> ApiResult<BoxPlotStats> {
    let stats = month_distributions(&state.context, query.position)?.stats();

    Ok(Json(ApiResponse::ok(
        stats,
        "Box plot statistics computed successfully",
    )))
}

/// Observed and forecasted density of every county of a state
#[utoipa::path(
    get,
    path = "/api/v1/charts/state",
    tag = "charts",
    params(StateQuery),
    responses(
        (status = 200, description = "State chart built successfully", body = ApiResponse<Figure>),
        (status = 400, description = "Missing state parameter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_state_chart(
    ApiQuery(query): ApiQuery<StateQuery>,
    State(state): State<AppState>,
) -> ApiResult<Figure> {
    let figure = state_forecast_figure(&state.context, &query.state)?;
    debug!("State chart has {} traces", figure.trace_count());

    Ok(Json(ApiResponse::ok(figure, "State chart built successfully")))
}

/// Observed and forecasted density of one county
#[utoipa::path(
    get,
    path = "/api/v1/charts/county",
    tag = "charts",
    params(CountyQuery),
    responses(
        (status = 200, description = "County chart built successfully", body = ApiResponse<Figure>),
        (status = 400, description = "Missing state or county parameter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_county_chart(
    ApiQuery(query): ApiQuery<CountyQuery>,
    State(state): State<AppState>,
) -> ApiResult<Figure> {
    let figure = county_forecast_figure(&state.context, &query.state, &query.county)?;

    Ok(Json(ApiResponse::ok(figure, "County chart built successfully")))
}
