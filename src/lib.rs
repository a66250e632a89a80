pub mod error;
pub mod config;
pub mod lags;
pub mod group;
pub mod lead;
pub mod features;

#[cfg(test)]
mod testing;

pub use error::{LagError, Result};
pub use config::{LagConfig, ScanMode};
pub use lags::{compute_lags, fill_lags, validate_sorted, LagWindow, NO_WINDOW};
pub use group::{group_runs, lags_by_group};
pub use lead::{apply_forward, lead_values, lead_variance, ForwardAnalytic, ForwardVariance, LeadValue};
pub use features::{LeadFeatureRow, LeadFeatures, Quote};
