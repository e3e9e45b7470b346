//! Dispatch of UI events to the outputs that depend on them.
//!
//! Each binding declares which components it reads and which component
//! property it writes. An event runs every binding that reads the changed
//! component; the initial page load runs all of them.

use common::{
    reconcile_county, CallbackRequest, CallbackResponse, ComponentId, ComponentUpdate,
    DropdownOption, Figure, Property, SelectionState,
};
use compute::charts::{
    box_plot_figure, county_forecast_figure, empty_box_plot_figure, state_forecast_figure,
};
use compute::views::county_options;
use compute::DashboardContext;
use tracing::{debug, instrument};

/// What a binding produces
#[derive(Debug)]
pub enum Output {
    Figure(Figure),
    Options(Vec<DropdownOption>),
}

type Handler = fn(&DashboardContext, &SelectionState) -> compute::Result<Output>;

/// One dependency edge between inputs and an output property
pub struct Binding {
    pub inputs: &'static [ComponentId],
    pub output: ComponentId,
    pub property: Property,
    pub handler: Handler,
}

impl Binding {
    fn reads(&self, id: ComponentId) -> bool {
        self.inputs.contains(&id)
    }
}

/// Bindings in evaluation order. The county options come before the
/// county chart so a reset county is already applied when it is drawn.
pub static BINDINGS: &[Binding] = &[
    Binding {
        inputs: &[ComponentId::SliderDate],
        output: ComponentId::BoxPlot,
        property: Property::Figure,
        handler: box_plot_output,
    },
    Binding {
        inputs: &[ComponentId::DropdownState],
        output: ComponentId::DropdownCounty,
        property: Property::Options,
        handler: county_options_output,
    },
    Binding {
        inputs: &[ComponentId::DropdownState],
        output: ComponentId::StateChart,
        property: Property::Figure,
        handler: state_chart_output,
    },
    Binding {
        inputs: &[ComponentId::DropdownState, ComponentId::DropdownCounty],
        output: ComponentId::CountyChart,
        property: Property::Figure,
        handler: county_chart_output,
    },
];

fn box_plot_output(context: &DashboardContext, selection: &SelectionState) -> compute::Result<Output> {
    // No shared month: the slider has no positions to select
    if context.months().is_empty() {
        return empty_box_plot_figure().map(Output::Figure);
    }
    box_plot_figure(context, selection.month_position).map(Output::Figure)
}

fn county_options_output(context: &DashboardContext, selection: &SelectionState) -> compute::Result<Output> {
    let options = match selection.state.as_deref() {
        Some(state) => county_options(context, state),
        None => Vec::new(),
    };
    Ok(Output::Options(options))
}

fn state_chart_output(context: &DashboardContext, selection: &SelectionState) -> compute::Result<Output> {
    let state = selection.state.as_deref().unwrap_or_default();
    state_forecast_figure(context, state).map(Output::Figure)
}

fn county_chart_output(context: &DashboardContext, selection: &SelectionState) -> compute::Result<Output> {
    let state = selection.state.as_deref().unwrap_or_default();
    let county = selection.county.as_deref().unwrap_or_default();
    county_forecast_figure(context, state, county).map(Output::Figure)
}

/// Run the bindings affected by `request` and collect their updates.
///
/// When the county options change and no longer contain the selected
/// county, the selection falls back to the first county and a value update
/// for the county dropdown is emitted right after the options.
#[instrument(skip(context))]
pub fn dispatch(context: &DashboardContext, request: &CallbackRequest) -> compute::Result<CallbackResponse> {
    let mut selection = request.selection.clone();
    let mut changed: Vec<ComponentId> = request.changed.into_iter().collect();
    let run_all = request.changed.is_none();
    let mut updates = Vec::new();

    for binding in BINDINGS {
        if !run_all && !changed.iter().any(|id| binding.reads(*id)) {
            continue;
        }
        debug!("Running binding for {}", binding.output.as_str());

        match (binding.handler)(context, &selection)? {
            Output::Figure(figure) => {
                updates.push(update(binding, serde_json::to_value(figure)?));
            }
            Output::Options(options) => {
                let county = if binding.output == ComponentId::DropdownCounty {
                    Some(reconcile_county(selection.county.as_deref(), &options))
                } else {
                    None
                };
                updates.push(update(binding, serde_json::to_value(&options)?));

                if let Some(county) = county {
                    if county != selection.county {
                        updates.push(ComponentUpdate {
                            id: ComponentId::DropdownCounty,
                            property: Property::Value,
                            value: serde_json::to_value(&county)?,
                        });
                        selection.county = county;
                        changed.push(ComponentId::DropdownCounty);
                    }
                }
            }
        }
    }

    Ok(CallbackResponse { selection, updates })
}

fn update(binding: &Binding, value: serde_json::Value) -> ComponentUpdate {
    ComponentUpdate {
        id: binding.output,
        property: binding.property,
        value,
    }
}
