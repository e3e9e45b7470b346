use axum::{
    extract::State,
    response::Json,
};
use common::{ApiResponse, DropdownOption};
use compute::views::{county_options, state_options};
use tracing::{debug, instrument};
use crate::schemas::{ApiQuery, ApiResult, AppState, ErrorResponse, StateQuery};

/// List the states of the historical table, in first-seen order
#[utoipa::path(
    get,
    path = "/api/v1/states",
    tag = "options",
    responses(
        (status = 200, description = "States retrieved successfully", body = ApiResponse<Vec<DropdownOption>>),
    )
)]
#[instrument(skip(state))]
pub async fn get_states(State(state): State<AppState>) -> ApiResult<Vec<DropdownOption>> {
    let options = state_options(&state.context);

    Ok(Json(ApiResponse::ok(options, "States retrieved successfully")))
}

/// List the counties of a state, in first-seen order
///
/// An unknown state yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/counties",
    tag = "options",
    params(StateQuery),
    responses(
        (status = 200, description = "Counties retrieved successfully", body = ApiResponse<Vec<DropdownOption>>),
        (status = 400, description = "Missing state parameter", body = ErrorResponse),
    )
)]
#[instrument(skip(state))]
pub async fn get_counties(
    ApiQuery(query): ApiQuery<StateQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<DropdownOption>> {
    let options = county_options(&state.context, &query.state);
    debug!("{} counties for {}", options.len(), query.state);

    Ok(Json(ApiResponse::ok(options, "Counties retrieved successfully")))
}
