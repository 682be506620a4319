pub mod axes;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod growth;
pub mod output;
pub mod pipeline;
pub mod plot;

pub use config::Config;
pub use data::{load_figure_data, IncomeGroup, RawTable};
pub use error::{GrowthError, Result};
pub use growth::{compute_growth_rates, GrowthRateTable};
pub use output::OutputSet;
