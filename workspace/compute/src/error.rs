use std::path::PathBuf;

use thiserror::Error;
use tracing::error;

use crate::dataset::TableKind;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// An input file does not exist
    #[error("{table} file not found: {}", path.display())]
    MissingFile { table: TableKind, path: PathBuf },

    /// An input file lacks one of the required columns
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn {
        table: TableKind,
        column: &'static str,
    },

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// A month cell that is not an ISO date
    #[error("{table} table, row {row}: invalid date '{value}'")]
    InvalidDate {
        table: TableKind,
        row: usize,
        value: String,
    },

    /// A null, non-numeric or negative cell
    #[error("{table} table, row {row}: invalid value in column '{column}'")]
    InvalidValue {
        table: TableKind,
        row: usize,
        column: &'static str,
    },

    /// A slider position outside the month index
    #[error("month position {position} is out of range (index has {len} months)")]
    MonthOutOfRange { position: usize, len: usize },

    /// Error while turning a plotly figure into JSON
    #[error("Chart rendering error: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        let compute_error = match error {
            polars::error::PolarsError::ColumnNotFound(_) => {
                ComputeError::DataFrame(format!("Column not found: {}", error))
            }
            polars::error::PolarsError::NoData(_) => {
                ComputeError::DataFrame(format!("No data: {}", error))
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                ComputeError::DataFrame(format!("Schema mismatch: {}", error))
            }
            polars::error::PolarsError::ComputeError(_) => {
                ComputeError::DataFrame(format!("Compute error: {}", error))
            }
            _ => ComputeError::DataFrame(error.to_string()),
        };
        error!(err = %compute_error, "DataFrame error");
        compute_error
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
