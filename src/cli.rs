use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use compute::DataPaths;

pub mod commands;

use commands::{check, serve};

use crate::config::{
    AppConfig, DEFAULT_BIND_ADDRESS, DEFAULT_COUNTY, DEFAULT_DASHBOARD_PATH, DEFAULT_STATE,
    DEFAULT_TEST_PATH, DEFAULT_TRAIN_PATH,
};

#[derive(Parser)]
#[command(name = "mbd-dashboard")]
#[command(about = "Microbusiness density dashboard with historical data and forecasts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Locations of the three input CSV files
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Historical observations (train table)
    #[arg(long, env = "MBD_TRAIN_PATH", default_value = DEFAULT_TRAIN_PATH)]
    pub train_path: PathBuf,

    /// Forecast rows (test table)
    #[arg(long, env = "MBD_TEST_PATH", default_value = DEFAULT_TEST_PATH)]
    pub test_path: PathBuf,

    /// Combined table the charts are drawn from
    #[arg(long, env = "MBD_DASHBOARD_PATH", default_value = DEFAULT_DASHBOARD_PATH)]
    pub dashboard_path: PathBuf,
}

impl From<DataArgs> for DataPaths {
    fn from(args: DataArgs) -> Self {
        DataPaths {
            historical: args.train_path,
            forecast: args.test_path,
            display: args.dashboard_path,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind_address: String,

        /// State preselected in the state dropdown
        #[arg(long, env = "MBD_DEFAULT_STATE", default_value = DEFAULT_STATE)]
        default_state: String,

        /// County preselected in the county dropdown
        #[arg(long, env = "MBD_DEFAULT_COUNTY", default_value = DEFAULT_COUNTY)]
        default_county: String,
    },
    /// Load and validate the input tables, then print a summary
    Check {
        #[command(flatten)]
        data: DataArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data,
                bind_address,
                default_state,
                default_county,
            } => {
                let config = AppConfig {
                    data: data.into(),
                    bind_address,
                    default_state,
                    default_county,
                };
                serve(&config).await?;
            }
            Commands::Check { data } => {
                check(&data.into())?;
            }
        }
        Ok(())
    }
}
