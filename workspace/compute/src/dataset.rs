//! Loading of the three input tables.
//!
//! Every table is a CSV file with at least the columns listed in
//! [`REQUIRED_COLUMNS`]. Files are parsed with polars, projected onto the
//! required columns and turned into typed [`Observation`] rows. Any missing
//! file, missing column or bad cell fails the whole load.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, Result};

pub const STATE: &str = "state";
pub const COUNTY: &str = "county";
pub const CFIPS: &str = "cfips";
pub const MONTH: &str = "first_day_of_month";
pub const DENSITY: &str = "microbusiness_density";

pub const REQUIRED_COLUMNS: [&str; 5] = [STATE, COUNTY, CFIPS, MONTH, DENSITY];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which of the three inputs a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Observed history (training data)
    Historical,
    /// Held-out months carrying the forecasts
    Forecast,
    /// Denormalized table spanning history and forecast
    Display,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Historical => "historical",
            TableKind::Forecast => "forecast",
            TableKind::Display => "display",
        };
        f.write_str(name)
    }
}

/// One county-month density value.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub state: String,
    pub county: String,
    pub cfips: i64,
    pub month: NaiveDate,
    pub density: f64,
}

/// An immutable table of observations.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    kind: TableKind,
    rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(kind: TableKind, rows: Vec<Observation>) -> Self {
        Self { kind, rows }
    }

    /// Loads a table from a CSV file.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(kind: TableKind, path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ComputeError::MissingFile {
                table: kind,
                path: path.to_path_buf(),
            });
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        debug!(rows = df.height(), columns = df.width(), "Parsed CSV");

        Self::from_dataframe(kind, df)
    }

    /// Converts a parsed DataFrame into typed rows.
    pub fn from_dataframe(kind: TableKind, df: DataFrame) -> Result<Self> {
        for column in REQUIRED_COLUMNS {
            if df.column(column).is_err() {
                return Err(ComputeError::MissingColumn {
                    table: kind,
                    column,
                });
            }
        }

        let df = df
            .lazy()
            .select([
                col(STATE).cast(DataType::String),
                col(COUNTY).cast(DataType::String),
                col(CFIPS).cast(DataType::Int64),
                col(MONTH).cast(DataType::String),
                col(DENSITY).cast(DataType::Float64),
            ])
            .collect()?;

        let states = df.column(STATE)?.as_materialized_series().str()?;
        let counties = df.column(COUNTY)?.as_materialized_series().str()?;
        let cfips = df.column(CFIPS)?.as_materialized_series().i64()?;
        let months = df.column(MONTH)?.as_materialized_series().str()?;
        let densities = df.column(DENSITY)?.as_materialized_series().f64()?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let raw_month = required(months.get(i), kind, i, MONTH)?;
            let month = NaiveDate::parse_from_str(raw_month.trim(), DATE_FORMAT).map_err(|_| {
                ComputeError::InvalidDate {
                    table: kind,
                    row: i,
                    value: raw_month.to_string(),
                }
            })?;

            let density = required(densities.get(i), kind, i, DENSITY)?;
            if density.is_nan() || density < 0.0 {
                return Err(ComputeError::InvalidValue {
                    table: kind,
                    row: i,
                    column: DENSITY,
                });
            }

            rows.push(Observation {
                state: required(states.get(i), kind, i, STATE)?.to_string(),
                county: required(counties.get(i), kind, i, COUNTY)?.to_string(),
                cfips: required(cfips.get(i), kind, i, CFIPS)?,
                month,
                density,
            });
        }

        Ok(Self { kind, rows })
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct months of the table, ascending.
    pub fn distinct_months(&self) -> BTreeSet<NaiveDate> {
        self.rows.iter().map(|row| row.month).collect()
    }

    /// Distinct states of the table, ascending.
    pub fn distinct_states(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|row| row.state.as_str()).collect()
    }
}

fn required<T>(value: Option<T>, table: TableKind, row: usize, column: &'static str) -> Result<T> {
    value.ok_or(ComputeError::InvalidValue { table, row, column })
}

/// Locations of the three input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub historical: PathBuf,
    pub forecast: PathBuf,
    pub display: PathBuf,
}

impl DataPaths {
    /// The three files under one directory, using the given file names.
    pub fn in_dir(dir: impl AsRef<Path>, historical: &str, forecast: &str, display: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            historical: dir.join(historical),
            forecast: dir.join(forecast),
            display: dir.join(display),
        }
    }
}

/// The three loaded tables.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub historical: ObservationTable,
    pub forecast: ObservationTable,
    pub display: ObservationTable,
}

impl Dataset {
    /// Loads all three tables; the first failure aborts the load.
    #[instrument]
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let historical = ObservationTable::load(TableKind::Historical, &paths.historical)?;
        let forecast = ObservationTable::load(TableKind::Forecast, &paths.forecast)?;
        let display = ObservationTable::load(TableKind::Display, &paths.display)?;

        let display_rows = display.len();
        info!(
            historical = historical.len(),
            forecast = forecast.len(),
            display = display_rows,
            "Loaded input tables"
        );

        Ok(Self {
            historical,
            forecast,
            display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{month, testdata_paths};
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_fixture_tables() {
        let dataset = Dataset::load(&testdata_paths()).expect("fixture tables should load");

        assert_eq!(dataset.historical.len(), 15);
        assert_eq!(dataset.forecast.len(), 9);
        assert_eq!(dataset.display.len(), 26);
        assert_eq!(dataset.display.kind(), TableKind::Display);

        let first = &dataset.historical.rows()[0];
        assert_eq!(first.state, "Alabama");
        assert_eq!(first.county, "Autauga County");
        assert_eq!(first.cfips, 1001);
        assert_eq!(first.month, month(2022, 8));
        assert!((first.density - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_distinct_months_are_sorted() {
        let dataset = Dataset::load(&testdata_paths()).unwrap();
        let months: Vec<_> = dataset.forecast.distinct_months().into_iter().collect();
        assert_eq!(months, vec![month(2023, 1), month(2023, 2), month(2023, 3)]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let mut paths = testdata_paths();
        paths.forecast = paths.forecast.with_file_name("does_not_exist.csv");

        let err = Dataset::load(&paths).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::MissingFile {
                table: TableKind::Forecast,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_csv("cfips,county,state,first_day_of_month\n1001,Autauga County,Alabama,2022-08-01\n");

        let err = ObservationTable::load(TableKind::Historical, file.path()).unwrap_err();
        match err {
            ComputeError::MissingColumn { table, column } => {
                assert_eq!(table, TableKind::Historical);
                assert_eq!(column, DENSITY);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let file = write_csv(
            "cfips,county,state,first_day_of_month,microbusiness_density\n\
             1001,Autauga County,Alabama,2022-08-01,3.0\n\
             1001,Autauga County,Alabama,August 2022,3.1\n",
        );

        let err = ObservationTable::load(TableKind::Display, file.path()).unwrap_err();
        match err {
            ComputeError::InvalidDate { row, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(value, "August 2022");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_density_is_fatal() {
        let file = write_csv(
            "cfips,county,state,first_day_of_month,microbusiness_density\n\
             1001,Autauga County,Alabama,2022-08-01,-1.5\n",
        );

        let err = ObservationTable::load(TableKind::Historical, file.path()).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidValue {
                column: DENSITY,
                row: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let file = write_csv(
            "row_id,cfips,county,state,first_day_of_month,microbusiness_density,active\n\
             6009_2022-08-01,6009,Calaveras County,California,2022-08-01,2.1,800\n",
        );

        let table = ObservationTable::load(TableKind::Historical, file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].county, "Calaveras County");
        assert_eq!(table.rows()[0].cfips, 6009);
    }
}
