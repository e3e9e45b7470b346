use chrono::NaiveDate;
use common::{BoxPlotStats, RegionSummary};
use tracing::{debug, instrument};

use crate::context::DashboardContext;
use crate::error::{ComputeError, Result};

/// Five-number summary of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Density values of one state at one month.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDistribution {
    pub region: String,
    /// Every point, in display table order
    pub values: Vec<f64>,
}

impl RegionDistribution {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `None` for a state without rows at the month.
    pub fn summary(&self) -> Option<BoxSummary> {
        if self.values.is_empty() {
            return None;
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);

        Some(BoxSummary {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Per-state distributions for one slider position.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthDistributions {
    pub position: usize,
    pub month: NaiveDate,
    pub regions: Vec<RegionDistribution>,
}

impl MonthDistributions {
    /// Total number of points across all states.
    pub fn point_count(&self) -> usize {
        self.regions.iter().map(RegionDistribution::len).sum()
    }

    /// Transport form carrying the five-number summaries.
    pub fn stats(&self) -> BoxPlotStats {
        let regions = self
            .regions
            .iter()
            .map(|dist| {
                let summary = dist.summary();
                RegionSummary {
                    region: dist.region.clone(),
                    count: dist.len(),
                    min: summary.map(|s| s.min),
                    q1: summary.map(|s| s.q1),
                    median: summary.map(|s| s.median),
                    q3: summary.map(|s| s.q3),
                    max: summary.map(|s| s.max),
                }
            })
            .collect();

        BoxPlotStats {
            position: self.position,
            month: self.month,
            regions,
        }
    }
}

/// Groups the display rows of the month at `position` by state.
///
/// Every state of the box plot gets a distribution, empty when it has no
/// rows at that month.
#[instrument(skip(context))]
pub fn month_distributions(context: &DashboardContext, position: usize) -> Result<MonthDistributions> {
    let month = context
        .months()
        .month_at(position)
        .ok_or(ComputeError::MonthOutOfRange {
            position,
            len: context.months().len(),
        })?;

    let mut regions: Vec<RegionDistribution> = context
        .box_regions()
        .iter()
        .map(|region| RegionDistribution {
            region: region.clone(),
            values: Vec::new(),
        })
        .collect();

    for row in context.display_rows_for_month(month) {
        // box_regions is sorted and holds every display state
        if let Ok(slot) = regions.binary_search_by(|dist| dist.region.cmp(&row.state)) {
            regions[slot].values.push(row.density);
        }
    }

    let distributions = MonthDistributions {
        position,
        month,
        regions,
    };
    debug!(%month, points = distributions.point_count(), "Built month distributions");
    Ok(distributions)
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
