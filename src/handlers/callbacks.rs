use axum::{extract::State, response::Json};
use common::{ApiResponse, CallbackRequest, CallbackResponse};
use tracing::{debug, instrument};
use crate::callbacks::dispatch;
use crate::schemas::{ApiJson, ApiResult, AppState, ErrorResponse};

/// Run the bindings triggered by a UI event
///
/// Without `changed` every binding runs, as on initial page load.
#[utoipa::path(
    post,
    path = "/api/v1/callbacks",
    tag = "callbacks",
    request_body = CallbackRequest,
    responses(
        (status = 200, description = "Callbacks dispatched successfully", body = ApiResponse<CallbackResponse>),
        (status = 400, description = "Invalid selection", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn post_callback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CallbackRequest>,
) -> ApiResult<CallbackResponse> {
    let response = dispatch(&state.context, &request)?;
    debug!("Dispatch produced {} updates", response.updates.len());

    Ok(Json(ApiResponse::ok(
        response,
        "Callbacks dispatched successfully",
    )))
}
