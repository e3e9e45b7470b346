//! Indices derived from the loaded tables: the month slider domain and the
//! state/county catalog.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::dataset::ObservationTable;

/// Months shown on the slider, ascending, each addressed by its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthIndex {
    months: Vec<NaiveDate>,
}

impl MonthIndex {
    /// Months present in both the display and the historical table.
    ///
    /// Forecast-only months of the display table are left out.
    pub fn build(historical: &ObservationTable, display: &ObservationTable) -> Self {
        let observed = historical.distinct_months();
        let months = display
            .distinct_months()
            .intersection(&observed)
            .copied()
            .collect();
        Self { months }
    }

    /// Builds an index from arbitrary months; duplicates are dropped.
    pub fn from_months(months: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut months: Vec<NaiveDate> = months.into_iter().collect();
        months.sort_unstable();
        months.dedup();
        Self { months }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn month_at(&self, position: usize) -> Option<NaiveDate> {
        self.months.get(position).copied()
    }

    pub fn position_of(&self, month: NaiveDate) -> Option<usize> {
        self.months.binary_search(&month).ok()
    }

    pub fn last_position(&self) -> Option<usize> {
        self.months.len().checked_sub(1)
    }

    /// Whether the slider shows a label at `position`.
    pub fn is_labelled(&self, position: usize) -> bool {
        is_tick_position(position, self.months.len())
    }

    /// Labelled positions and their months.
    pub fn tick_labels(&self) -> Vec<(usize, NaiveDate)> {
        self.months
            .iter()
            .enumerate()
            .filter(|(position, _)| self.is_labelled(*position))
            .map(|(position, month)| (position, *month))
            .collect()
    }
}

/// First and last positions are always labelled; in between every third
/// position starting at 1.
pub fn is_tick_position(position: usize, len: usize) -> bool {
    if position >= len {
        return false;
    }
    position == 0 || position + 1 == len || (position - 1) % 3 == 0
}

/// States and the counties observed in each of them.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<String>,
    counties: HashMap<String, Vec<String>>,
}

impl RegionCatalog {
    /// Both regions and counties keep their first-seen order.
    pub fn build(historical: &ObservationTable) -> Self {
        let mut regions = Vec::new();
        let mut counties: HashMap<String, Vec<String>> = HashMap::new();
        let mut seen: HashSet<(&str, &str)> = HashSet::new();

        for row in historical.rows() {
            if !counties.contains_key(&row.state) {
                regions.push(row.state.clone());
                counties.insert(row.state.clone(), Vec::new());
            }
            if seen.insert((row.state.as_str(), row.county.as_str())) {
                if let Some(list) = counties.get_mut(&row.state) {
                    list.push(row.county.clone());
                }
            }
        }

        Self { regions, counties }
    }

    /// Regions in first-seen order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.counties.contains_key(region)
    }

    /// Counties of `region`; empty for an unknown region.
    pub fn counties(&self, region: &str) -> &[String] {
        self.counties
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
