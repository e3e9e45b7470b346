#[cfg(test)]
pub mod test_utils {
    use crate::config::{build_app_state, AppConfig};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::NaiveDate;
    use compute::dataset::{Dataset, Observation, ObservationTable, TableKind};
    use compute::{DashboardContext, DataPaths};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    const TESTDATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/workspace/compute/testdata");

    /// Paths of the fixture tables shipped with the compute crate
    pub fn testdata_paths() -> DataPaths {
        DataPaths::in_dir(TESTDATA_DIR, "train.csv", "test.csv", "dash.csv")
    }

    /// Load the fixture tables
    pub fn fixture_context() -> DashboardContext {
        DashboardContext::load(&testdata_paths()).expect("Failed to load fixture tables")
    }

    /// One county whose history (2022-01, 2022-02) and display rows
    /// (2022-03, 2022-04) share no month
    pub fn disjoint_context() -> DashboardContext {
        let row = |month: u32, density: f64| Observation {
            state: "Alabama".to_string(),
            county: "Autauga County".to_string(),
            cfips: 1001,
            month: NaiveDate::from_ymd_opt(2022, month, 1).unwrap(),
            density,
        };

        DashboardContext::new(Dataset {
            historical: ObservationTable::new(TableKind::Historical, vec![row(1, 3.0), row(2, 3.1)]),
            forecast: ObservationTable::new(TableKind::Forecast, vec![row(3, 3.2), row(4, 3.3)]),
            display: ObservationTable::new(TableKind::Display, vec![row(3, 3.2), row(4, 3.3)]),
        })
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        let config = AppConfig {
            data: testdata_paths(),
            ..AppConfig::default()
        };

        build_app_state(fixture_context(), &config).expect("Failed to build app state")
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        let _guard = init_test_tracing();

        let state = setup_test_app_state();
        create_router(state)
    }
}
