use axum::{extract::State, response::Json};
use common::{ApiResponse, MonthEntry, MonthIndexDto, PageLayout};
use tracing::{debug, instrument};
use crate::schemas::{ApiResult, AppState};

/// Get the page layout: texts, slider domain and dropdown defaults
#[utoipa::path(
    get,
    path = "/api/v1/layout",
    tag = "layout",
    responses(
        (status = 200, description = "Page layout retrieved successfully", body = ApiResponse<PageLayout>),
    )
)]
#[instrument(skip(state))]
pub async fn get_layout(State(state): State<AppState>) -> ApiResult<PageLayout> {
    Ok(Json(ApiResponse::ok(
        state.layout.as_ref().clone(),
        "Page layout retrieved successfully",
    )))
}

/// Get the months behind the slider positions
#[utoipa::path(
    get,
    path = "/api/v1/months",
    tag = "layout",
    responses(
        (status = 200, description = "Month index retrieved successfully", body = ApiResponse<MonthIndexDto>),
    )
)]
#[instrument(skip(state))]
pub async fn get_months(State(state): State<AppState>) -> ApiResult<MonthIndexDto> {
    let index = state.context.months();
    let months: Vec<MonthEntry> = index
        .months()
        .iter()
        .enumerate()
        .map(|(position, month)| MonthEntry {
            position,
            month: *month,
            label: index
                .is_labelled(position)
                .then(|| month.format("%Y-%m-%d").to_string()),
        })
        .collect();
    debug!("Returning {} months", months.len());

    Ok(Json(ApiResponse::ok(
        MonthIndexDto { months },
        "Month index retrieved successfully",
    )))
}
