use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use compute::{DashboardContext, DataPaths};

use crate::page::{build_layout, render_page};
use crate::schemas::AppState;

pub const DEFAULT_TRAIN_PATH: &str = "data/train_backup.csv";
pub const DEFAULT_TEST_PATH: &str = "data/test_backup.csv";
pub const DEFAULT_DASHBOARD_PATH: &str = "data/dash_df.csv";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:1234";
pub const DEFAULT_STATE: &str = "California";
pub const DEFAULT_COUNTY: &str = "Calaveras County";

/// Runtime configuration gathered from the command line and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Input CSV files
    pub data: DataPaths,
    /// Address the web server binds to
    pub bind_address: String,
    /// State preselected in the state dropdown
    pub default_state: String,
    /// County preselected in the county dropdown
    pub default_county: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataPaths {
                historical: PathBuf::from(DEFAULT_TRAIN_PATH),
                forecast: PathBuf::from(DEFAULT_TEST_PATH),
                display: PathBuf::from(DEFAULT_DASHBOARD_PATH),
            },
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            default_state: DEFAULT_STATE.to_string(),
            default_county: DEFAULT_COUNTY.to_string(),
        }
    }
}

/// Reads a `.env` file from the working directory, if there is one
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load the input tables and build the application state
pub fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    tracing::info!(
        historical = %config.data.historical.display(),
        forecast = %config.data.forecast.display(),
        display = %config.data.display.display(),
        "Loading input tables"
    );
    let context = DashboardContext::load(&config.data).context("failed to load input tables")?;

    build_app_state(context, config)
}

/// Build the application state around an already loaded context
pub fn build_app_state(context: DashboardContext, config: &AppConfig) -> Result<AppState> {
    let layout = build_layout(&context, &config.default_state, &config.default_county);
    let page = render_page(&layout).context("failed to render the dashboard page")?;

    Ok(AppState {
        context: Arc::new(context),
        layout: Arc::new(layout),
        page: page.into(),
    })
}
