use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};
use tracing::{info, instrument};

use crate::dataset::{DataPaths, Dataset, Observation};
use crate::error::Result;
use crate::index::{MonthIndex, RegionCatalog};

/// Everything the handlers read: the loaded tables and the indices derived
/// from them. Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    dataset: Dataset,
    months: MonthIndex,
    catalog: RegionCatalog,
    /// States grouped in the box plot, ascending
    box_regions: Vec<String>,
    /// Months drawn on "Observed" traces: history plus the first forecast month
    observed_months: BTreeSet<NaiveDate>,
    /// Months drawn on "Forecasted" traces
    forecast_months: BTreeSet<NaiveDate>,
    first_forecast_month: Option<NaiveDate>,
}

impl DashboardContext {
    pub fn new(dataset: Dataset) -> Self {
        let months = MonthIndex::build(&dataset.historical, &dataset.display);
        let catalog = RegionCatalog::build(&dataset.historical);

        let mut box_regions: BTreeSet<&str> = dataset.historical.distinct_states();
        box_regions.extend(dataset.display.distinct_states());
        let box_regions = box_regions.into_iter().map(str::to_string).collect();

        let forecast_months = dataset.forecast.distinct_months();
        let first_forecast_month = forecast_months.first().copied();

        let mut observed_months = dataset.historical.distinct_months();
        observed_months.extend(first_forecast_month);

        Self {
            dataset,
            months,
            catalog,
            box_regions,
            observed_months,
            forecast_months,
            first_forecast_month,
        }
    }

    /// Loads the three tables and derives the indices.
    #[instrument]
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let context = Self::new(Dataset::load(paths)?);
        info!(
            months = context.months.len(),
            states = context.catalog.regions().len(),
            counties = context.county_total(),
            forecast_months = context.forecast_months.len(),
            "Dashboard context ready"
        );
        Ok(context)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn months(&self) -> &MonthIndex {
        &self.months
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn box_regions(&self) -> &[String] {
        &self.box_regions
    }

    pub fn observed_months(&self) -> &BTreeSet<NaiveDate> {
        &self.observed_months
    }

    pub fn forecast_months(&self) -> &BTreeSet<NaiveDate> {
        &self.forecast_months
    }

    /// The month joining the observed and forecasted segments.
    pub fn first_forecast_month(&self) -> Option<NaiveDate> {
        self.first_forecast_month
    }

    /// Year shown in forecast chart titles.
    pub fn forecast_year(&self) -> Option<i32> {
        self.first_forecast_month.map(|month| month.year())
    }

    /// Number of distinct counties (by cfips) with history.
    pub fn county_total(&self) -> usize {
        self.dataset
            .historical
            .rows()
            .iter()
            .map(|row| row.cfips)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Display rows of one state.
    pub fn display_rows_for_state<'a>(
        &'a self,
        state: &'a str,
    ) -> impl Iterator<Item = &'a Observation> + 'a {
        self.dataset
            .display
            .rows()
            .iter()
            .filter(move |row| row.state == state)
    }

    /// Display rows of one month.
    pub fn display_rows_for_month(&self, month: NaiveDate) -> impl Iterator<Item = &Observation> {
        self.dataset
            .display
            .rows()
            .iter()
            .filter(move |row| row.month == month)
    }
}
