//! Configuration for lag window computation

use crate::error::Result;
use crate::lags::LagWindow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the forward scan locates each window end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Restart the scan at `i + 1` for every position (quadratic worst case)
    Restart,
    /// Carry a single monotone cursor across positions (linear)
    #[default]
    Sweep,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Restart => "restart",
            ScanMode::Sweep => "sweep",
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "restart" => Ok(ScanMode::Restart),
            "sweep" => Ok(ScanMode::Sweep),
            other => Err(format!("unknown scan mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lag window configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagConfig {
    /// Forward window length, in the same unit as the timestamps (default: 0.0)
    pub lag_length: f64,
    /// Scan strategy (default: sweep)
    pub scan: ScanMode,
    /// Reject unsorted or non-finite timestamps before scanning (default: false)
    pub validate_sorted: bool,
}

impl Default for LagConfig {
    fn default() -> Self {
        LagConfig {
            lag_length: 0.0,
            scan: ScanMode::default(),
            validate_sorted: false,
        }
    }
}

impl LagConfig {
    /// Creates a configuration with the given lag length and default options.
    pub fn new(lag_length: f64) -> Self {
        LagConfig {
            lag_length,
            ..LagConfig::default()
        }
    }

    pub fn with_scan(mut self, scan: ScanMode) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_validation(mut self, validate_sorted: bool) -> Self {
        self.validate_sorted = validate_sorted;
        self
    }

    /// Reads `LAG_LENGTH`, `LAG_SCAN` and `LAG_VALIDATE_SORTED`, keeping the
    /// default for any variable that is missing or fails to parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LagConfig::default();

        let lag_length = lookup("LAG_LENGTH")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .unwrap_or(defaults.lag_length);
        let scan = lookup("LAG_SCAN")
            .and_then(|value| value.parse::<ScanMode>().ok())
            .unwrap_or(defaults.scan);
        let validate_sorted = lookup("LAG_VALIDATE_SORTED")
            .and_then(|value| parse_flag(&value))
            .unwrap_or(defaults.validate_sorted);

        LagConfig {
            lag_length,
            scan,
            validate_sorted,
        }
    }

    /// Validates the configuration and returns a ready computer.
    pub fn build(self) -> Result<LagWindow> {
        LagWindow::from_config(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
