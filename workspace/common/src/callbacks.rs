use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::layout::DropdownOption;

/// Identifiers of the interactive elements on the page.
///
/// The serialized names double as the DOM ids of the elements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum ComponentId {
    #[serde(rename = "slider-date")]
    SliderDate,
    #[serde(rename = "dd-boxplot")]
    BoxPlot,
    #[serde(rename = "dropdown_state")]
    DropdownState,
    #[serde(rename = "dd-output-state")]
    StateChart,
    #[serde(rename = "dropdown_cfips")]
    DropdownCounty,
    #[serde(rename = "dd-output-cfips")]
    CountyChart,
}

impl ComponentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::SliderDate => "slider-date",
            ComponentId::BoxPlot => "dd-boxplot",
            ComponentId::DropdownState => "dropdown_state",
            ComponentId::StateChart => "dd-output-state",
            ComponentId::DropdownCounty => "dropdown_cfips",
            ComponentId::CountyChart => "dd-output-cfips",
        }
    }
}

/// The property of a component a handler writes to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Figure,
    Options,
    Value,
}

/// What the user currently has selected on the page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// Position on the month slider
    pub month_position: usize,
    /// Selected state
    pub state: Option<String>,
    /// Selected county of that state
    pub county: Option<String>,
}

/// A UI event sent by the page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CallbackRequest {
    /// The component whose value changed; `None` on initial page load,
    /// which runs every binding.
    #[serde(default)]
    pub changed: Option<ComponentId>,
    /// Selection after the change
    pub selection: SelectionState,
}

/// A new value for one property of one component.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ComponentUpdate {
    pub id: ComponentId,
    pub property: Property,
    #[schema(value_type = Object)]
    pub value: Value,
}

/// Everything the page must apply after an event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CallbackResponse {
    /// Selection after dependent resets
    pub selection: SelectionState,
    /// Updates in the order the bindings ran
    pub updates: Vec<ComponentUpdate>,
}

impl CallbackResponse {
    /// The update written to `(id, property)`, if a binding produced one.
    pub fn update_for(&self, id: ComponentId, property: Property) -> Option<&ComponentUpdate> {
        self.updates
            .iter()
            .find(|update| update.id == id && update.property == property)
    }
}

/// Keeps `selected` if it is still one of `options`, otherwise falls back
/// to the first option, or to nothing when there are no options.
pub fn reconcile_county(selected: Option<&str>, options: &[DropdownOption]) -> Option<String> {
    if let Some(current) = selected {
        if options.iter().any(|option| option.value == current) {
            return Some(current.to_string());
        }
    }

    let fallback = options.first().map(|option| option.value.clone());
    debug!(?selected, ?fallback, "County selection reset");
    fallback
}
