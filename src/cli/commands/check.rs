use anyhow::{Context, Result};
use compute::{DashboardContext, DataPaths};
use tracing::{info, warn};

/// Load the input tables and log what the dashboard would show.
pub fn check(paths: &DataPaths) -> Result<()> {
    info!(
        "Checking input tables: {}, {}, {}",
        paths.historical.display(),
        paths.forecast.display(),
        paths.display.display()
    );

    let context = DashboardContext::load(paths).context("failed to load input tables")?;
    let dataset = context.dataset();
    info!(
        historical = dataset.historical.len(),
        forecast = dataset.forecast.len(),
        display = dataset.display.len(),
        "Tables loaded"
    );

    let months = context.months();
    match (months.months().first(), months.months().last()) {
        (Some(first), Some(last)) => {
            info!("Slider covers {} months, {} to {}", months.len(), first, last)
        }
        _ => warn!("Historical and display tables share no months; the slider is empty"),
    }

    info!(
        "{} states, {} counties",
        context.catalog().regions().len(),
        context.county_total()
    );

    match context.first_forecast_month() {
        Some(month) => info!("Forecast starts at {}", month),
        None => warn!("Forecast table is empty"),
    }

    Ok(())
}
