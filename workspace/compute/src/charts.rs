//! Rendering of the view computations into plotly figures.

use common::Figure;
use plotly::box_plot::BoxPoints;
use plotly::common::{Font, Line, Mode, Title};
use plotly::layout::{Axis, AxisType, Legend};
use plotly::{BoxPlot, Layout, Plot, Scatter};
use serde_json::Value;
use tracing::instrument;

use crate::context::DashboardContext;
use crate::error::Result;
use crate::views::{self, SplitSeries};

const CHART_HEIGHT: usize = 600;
const OBSERVED_COLOR: &str = "black";
const FORECAST_COLOR: &str = "red";

fn base_layout(title: &str, x_title: &str, y_axis: Axis) -> Layout {
    Layout::new()
        .height(CHART_HEIGHT)
        .title(Title::with_text(title))
        .x_axis(Axis::new().title(Title::with_text(x_title)))
        .y_axis(y_axis)
        .font(
            Font::new()
                .family("Courier New, monospace")
                .size(18)
                .color("RebeccaPurple"),
        )
}

fn small_legend() -> Legend {
    Legend::new().font(Font::new().family("Courier").size(8).color("black"))
}

fn forecast_title(context: &DashboardContext, subject: &str) -> String {
    match context.forecast_year() {
        Some(year) => format!("MBD forecast ({year}) for {subject}"),
        None => format!("MBD forecast for {subject}"),
    }
}

/// Adds the "Observed" and "Forecasted" traces of one series.
fn add_split_traces(
    plot: &mut Plot,
    series: &SplitSeries,
    observed_name: &str,
    forecasted_name: &str,
    mode: Option<Mode>,
) {
    let parts = [
        (&series.observed, observed_name, OBSERVED_COLOR),
        (&series.forecasted, forecasted_name, FORECAST_COLOR),
    ];

    for (points, name, color) in parts {
        let mut trace = Scatter::new(points.x.clone(), points.y.clone())
            .web_gl_mode(true)
            .name(name)
            .line(Line::new().color(color));
        if let Some(mode) = mode.clone() {
            trace = trace.mode(mode);
        }
        plot.add_trace(trace);
    }
}

/// Splits the plotly JSON into the figure's `data` and `layout`.
fn into_figure(plot: Plot) -> Result<Figure> {
    let mut value: Value = serde_json::from_str(&plot.to_json())?;

    let data = match value.get_mut("data").map(Value::take) {
        Some(Value::Array(traces)) => traces,
        _ => Vec::new(),
    };
    let layout = value
        .get_mut("layout")
        .map(Value::take)
        .unwrap_or_else(|| Value::Object(Default::default()));

    Ok(Figure::new(data, layout))
}

/// Box plot of density per state at the slider position.
#[instrument(skip(context))]
pub fn box_plot_figure(context: &DashboardContext, position: usize) -> Result<Figure> {
    let distributions = views::month_distributions(context, position)?;

    let mut plot = Plot::new();
    for region in distributions.regions {
        let trace = BoxPlot::new(region.values)
            .name(region.region.as_str())
            .box_points(BoxPoints::All);
        plot.add_trace(trace);
    }

    plot.set_layout(box_plot_layout());

    into_figure(plot)
}

/// The box plot frame without distributions, drawn when no month is
/// shared by the historical and display tables.
pub fn empty_box_plot_figure() -> Result<Figure> {
    let mut plot = Plot::new();
    plot.set_layout(box_plot_layout());

    into_figure(plot)
}

fn box_plot_layout() -> Layout {
    let y_axis = Axis::new()
        .title(Title::with_text("Log-microbusiness density"))
        .type_(AxisType::Log);
    base_layout(
        "Box plot of microbusiness density, per state and date",
        "state",
        y_axis,
    )
    .legend(small_legend())
}

/// Observed and forecasted lines of every county of `state`.
#[instrument(skip(context))]
pub fn state_forecast_figure(context: &DashboardContext, state: &str) -> Result<Figure> {
    let mut plot = Plot::new();
    for county in views::state_forecast(context, state) {
        add_split_traces(
            &mut plot,
            &county.series,
            &format!("Observed, {}", county.county),
            &format!("Forecasted, {}", county.county),
            Some(Mode::LinesMarkers),
        );
    }

    let y_axis = Axis::new()
        .title(Title::with_text("Microbusiness density"))
        .type_(AxisType::Log);
    let title = forecast_title(context, &format!("state {state}"));
    plot.set_layout(base_layout(&title, "Date", y_axis).legend(small_legend()));

    into_figure(plot)
}

/// Observed and forecasted line of one county. A county without display
/// rows gives a figure with no traces.
#[instrument(skip(context))]
pub fn county_forecast_figure(context: &DashboardContext, state: &str, county: &str) -> Result<Figure> {
    let mut plot = Plot::new();
    if let Some(series) = views::county_forecast(context, state, county) {
        add_split_traces(&mut plot, &series, "Observed", "Forecasted", None);
    }

    let y_axis = Axis::new().title(Title::with_text("Microbusiness density"));
    let title = forecast_title(context, county);
    plot.set_layout(base_layout(&title, "Date", y_axis));

    into_figure(plot)
}
