//! Common transport-layer types shared between the server and the page.
//! These structs describe the payloads the dashboard handlers return so
//! the browser side and the tests can deserialize them without duplicating
//! shapes.

mod callbacks;
mod figure;
mod layout;

pub use callbacks::{
    reconcile_county, CallbackRequest, CallbackResponse, ComponentId, ComponentUpdate, Property,
    SelectionState,
};
pub use figure::{BoxPlotStats, Figure, MonthEntry, MonthIndexDto, RegionSummary};
pub use layout::{DropdownOption, DropdownSpec, PageLayout, PageText, SliderMark, SliderSpec};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by every JSON endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a successful response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
