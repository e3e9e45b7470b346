use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::callbacks::{ComponentId, SelectionState};

/// An entry of a dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DropdownOption {
    /// Displayed text
    pub label: String,
    /// Value sent back on selection
    pub value: String,
}

impl DropdownOption {
    /// An option whose label and value are the same string.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
        }
    }
}

/// A labelled tick on the month slider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SliderMark {
    pub position: usize,
    pub label: String,
}

/// The month slider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SliderSpec {
    pub id: ComponentId,
    pub min: usize,
    pub max: usize,
    pub step: usize,
    /// Initially selected position
    pub value: usize,
    pub marks: Vec<SliderMark>,
}

/// A dropdown and its initial state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DropdownSpec {
    pub id: ComponentId,
    pub options: Vec<DropdownOption>,
    /// Initially selected value
    pub value: Option<String>,
}

/// Static texts of the page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PageText {
    /// Browser tab title
    pub document_title: String,
    pub header: String,
    pub subheader: String,
    pub description: String,
    pub link_text: String,
    pub link_href: String,
    pub box_plot_header: String,
    pub forecast_header: String,
}

/// Full description of the dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PageLayout {
    pub text: PageText,
    pub slider: SliderSpec,
    pub state_dropdown: DropdownSpec,
    pub county_dropdown: DropdownSpec,
    /// Chart placeholders, top to bottom
    pub graphs: Vec<ComponentId>,
    /// Selection the page starts with
    pub initial_selection: SelectionState,
}
