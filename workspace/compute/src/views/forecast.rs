use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::context::DashboardContext;
use crate::dataset::Observation;

/// x/y columns of one line trace. A `None` month is a gap: the density is
/// kept for alignment but nothing is plotted there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TracePoints {
    pub x: Vec<Option<NaiveDate>>,
    pub y: Vec<f64>,
}

impl TracePoints {
    /// Points that are actually drawn.
    pub fn plotted(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .filter_map(|(month, density)| month.map(|month| (month, *density)))
    }

    pub fn plotted_count(&self) -> usize {
        self.x.iter().filter(|month| month.is_some()).count()
    }
}

/// One county's series split into its observed and forecasted parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitSeries {
    pub observed: TracePoints,
    pub forecasted: TracePoints,
}

/// The split series of one county of a state chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CountySeries {
    pub cfips: i64,
    pub county: String,
    pub series: SplitSeries,
}

/// Splits `rows` into observed and forecasted points, ordered by month.
///
/// Both traces share the same x positions; each only keeps the months it
/// owns. The first forecast month is owned by both so the segments meet.
pub fn split_series<'a>(
    context: &DashboardContext,
    rows: impl IntoIterator<Item = &'a Observation>,
) -> SplitSeries {
    let mut rows: Vec<&Observation> = rows.into_iter().collect();
    rows.sort_by_key(|row| row.month);

    let observed = context.observed_months();
    let forecast = context.forecast_months();
    let y: Vec<f64> = rows.iter().map(|row| row.density).collect();

    SplitSeries {
        observed: TracePoints {
            x: rows
                .iter()
                .map(|row| observed.contains(&row.month).then_some(row.month))
                .collect(),
            y: y.clone(),
        },
        forecasted: TracePoints {
            x: rows
                .iter()
                .map(|row| forecast.contains(&row.month).then_some(row.month))
                .collect(),
            y,
        },
    }
}

/// Split series of every county of `state`, grouped by cfips in the order
/// the counties first appear in the display table.
#[instrument(skip(context))]
pub fn state_forecast(context: &DashboardContext, state: &str) -> Vec<CountySeries> {
    let mut groups: Vec<(i64, Vec<&Observation>)> = Vec::new();
    for row in context.display_rows_for_state(state) {
        match groups.iter_mut().find(|(cfips, _)| *cfips == row.cfips) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((row.cfips, vec![row])),
        }
    }

    let counties: Vec<CountySeries> = groups
        .into_iter()
        .map(|(cfips, rows)| CountySeries {
            cfips,
            county: rows[0].county.clone(),
            series: split_series(context, rows),
        })
        .collect();

    debug!(counties = counties.len(), "Built state forecast");
    counties
}

/// Split series of one county; `None` when no display row matches.
#[instrument(skip(context))]
pub fn county_forecast(context: &DashboardContext, state: &str, county: &str) -> Option<SplitSeries> {
    let rows: Vec<&Observation> = context
        .display_rows_for_state(state)
        .filter(|row| row.county == county)
        .collect();

    if rows.is_empty() {
        debug!("No display rows for county");
        return None;
    }
    Some(split_series(context, rows))
}
