//! Fixtures shared by the compute tests. The in-memory dataset mirrors the
//! CSV files under `testdata/` row for row.

use chrono::NaiveDate;

use crate::context::DashboardContext;
use crate::dataset::{DataPaths, Dataset, Observation, ObservationTable, TableKind};

pub fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

pub fn obs(state: &str, county: &str, cfips: i64, month: NaiveDate, density: f64) -> Observation {
    Observation {
        state: state.to_string(),
        county: county.to_string(),
        cfips,
        month,
        density,
    }
}

pub fn testdata_paths() -> DataPaths {
    DataPaths::in_dir(
        concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"),
        "train.csv",
        "test.csv",
        "dash.csv",
    )
}

const HISTORY: [(i32, u32); 5] = [(2022, 8), (2022, 9), (2022, 10), (2022, 11), (2022, 12)];
const FORECAST: [(i32, u32); 3] = [(2023, 1), (2023, 2), (2023, 3)];

/// (state, county, cfips, history densities, forecast densities)
type CountyFixture = (&'static str, &'static str, i64, [f64; 5], [f64; 3]);

const COUNTIES: [CountyFixture; 3] = [
    (
        "Alabama",
        "Autauga County",
        1001,
        [3.00, 3.01, 3.02, 3.03, 3.04],
        [3.05, 3.06, 3.07],
    ),
    (
        "California",
        "Alameda County",
        6001,
        [4.50, 4.52, 4.55, 4.57, 4.60],
        [4.62, 4.64, 4.66],
    ),
    (
        "California",
        "Calaveras County",
        6009,
        [2.10, 2.12, 2.11, 2.15, 2.18],
        [2.20, 2.21, 2.23],
    ),
];

/// Three counties with five observed and three forecast months, plus one
/// Wyoming county that only exists in the display table.
pub fn fixture_dataset() -> Dataset {
    let mut historical = Vec::new();
    let mut forecast = Vec::new();
    let mut display = Vec::new();

    for (state, county, cfips, observed, predicted) in COUNTIES {
        for ((year, m), density) in HISTORY.into_iter().zip(observed) {
            let row = obs(state, county, cfips, month(year, m), density);
            historical.push(row.clone());
            display.push(row);
        }
        for ((year, m), density) in FORECAST.into_iter().zip(predicted) {
            let row = obs(state, county, cfips, month(year, m), density);
            forecast.push(row.clone());
            display.push(row);
        }
    }
    display.push(obs("Wyoming", "Albany County", 56001, month(2022, 12), 5.50));
    display.push(obs("Wyoming", "Albany County", 56001, month(2023, 1), 5.60));

    Dataset {
        historical: ObservationTable::new(TableKind::Historical, historical),
        forecast: ObservationTable::new(TableKind::Forecast, forecast),
        display: ObservationTable::new(TableKind::Display, display),
    }
}

pub fn fixture_context() -> DashboardContext {
    DashboardContext::new(fixture_dataset())
}
