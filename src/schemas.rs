use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::{
    ApiResponse, BoxPlotStats, CallbackRequest, CallbackResponse, ComponentId, ComponentUpdate,
    DropdownOption, DropdownSpec, Figure, MonthEntry, MonthIndexDto, PageLayout, PageText,
    Property, RegionSummary, SelectionState, SliderMark, SliderSpec,
};
use compute::{ComputeError, DashboardContext};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Loaded tables and derived indices
    pub context: Arc<DashboardContext>,
    /// Static page description
    pub layout: Arc<PageLayout>,
    /// Rendered HTML page
    pub page: Arc<str>,
}

/// Query parameters for the box plot endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BoxPlotQuery {
    /// Month slider position (0-based)
    pub position: usize,
}

/// Query parameters selecting a state
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StateQuery {
    /// State name, e.g. California
    pub state: String,
}

/// Query parameters selecting a county of a state
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CountyQuery {
    /// State name, e.g. California
    pub state: String,
    /// County name, e.g. Calaveras County
    pub county: String,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Months on the slider
    pub months: usize,
    /// Rows of the historical table
    pub historical_rows: usize,
    /// Rows of the forecast table
    pub forecast_rows: usize,
    /// Rows of the display table
    pub display_rows: usize,
}

/// Errors returned by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<ComputeError> for ApiError {
    fn from(err: ComputeError) -> Self {
        match err {
            ComputeError::MonthOutOfRange { .. } => {
                warn!(%err, "Rejected selection");
                ApiError::BadRequest(err.to_string())
            }
            other => {
                error!(err = %other, "Handler failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(%rejection, "Rejected query string");
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(%rejection, "Rejected request body");
        ApiError::BadRequest(rejection.body_text())
    }
}

/// `Query` extractor whose rejection is an `ErrorResponse`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Json` extractor whose rejection is an `ErrorResponse`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type of the JSON handlers
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::layout::get_layout,
        crate::handlers::layout::get_months,
        crate::handlers::options::get_states,
        crate::handlers::options::get_counties,
        crate::handlers::charts::get_box_plot,
        crate::handlers::charts::get_box_plot_stats,
        crate::handlers::charts::get_state_chart,
        crate::handlers::charts::get_county_chart,
        crate::handlers::callbacks::post_callback,
    ),
    components(
        schemas(
            ApiResponse<Figure>,
            ApiResponse<PageLayout>,
            ApiResponse<MonthIndexDto>,
            ApiResponse<Vec<DropdownOption>>,
            ApiResponse<BoxPlotStats>,
            ApiResponse<CallbackResponse>,
            ErrorResponse,
            HealthResponse,
            BoxPlotQuery,
            StateQuery,
            CountyQuery,
            Figure,
            PageLayout,
            PageText,
            SliderSpec,
            SliderMark,
            DropdownSpec,
            DropdownOption,
            MonthIndexDto,
            MonthEntry,
            BoxPlotStats,
            RegionSummary,
            CallbackRequest,
            CallbackResponse,
            ComponentUpdate,
            ComponentId,
            Property,
            SelectionState,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "layout", description = "Page layout and slider domain"),
        (name = "options", description = "Dropdown options"),
        (name = "charts", description = "Chart figures"),
        (name = "callbacks", description = "UI event dispatch"),
    ),
    info(
        title = "MBD Dashboard API",
        description = "Microbusiness density history and forecasts for US counties",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
