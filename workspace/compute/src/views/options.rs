use common::DropdownOption;
use tracing::instrument;

use crate::context::DashboardContext;

/// County dropdown entries for `state`, in first-seen order.
///
/// Only counties with history are offered; an unknown state yields no
/// options.
#[instrument(skip(context))]
pub fn county_options(context: &DashboardContext, state: &str) -> Vec<DropdownOption> {
    context
        .catalog()
        .counties(state)
        .iter()
        .map(|county| DropdownOption::same(county.as_str()))
        .collect()
}

/// State dropdown entries, in first-seen order.
pub fn state_options(context: &DashboardContext) -> Vec<DropdownOption> {
    context
        .catalog()
        .regions()
        .iter()
        .map(|state| DropdownOption::same(state.as_str()))
        .collect()
}
