//! Pure view computations behind the dashboard handlers.

pub mod box_plot;
pub mod forecast;
pub mod options;

pub use box_plot::{month_distributions, BoxSummary, MonthDistributions, RegionDistribution};
pub use forecast::{county_forecast, split_series, state_forecast, CountySeries, SplitSeries, TracePoints};
pub use options::{county_options, state_options};
