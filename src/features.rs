//! Quote-level lead features
//!
//! Joins the grouped lag scan with the lead analytics: for each top-of-book
//! quote, the bid, ask, spread and midpoint one lag length ahead, plus the
//! variance of the midpoint over that forward window. Quotes are grouped by
//! trading date so windows stay inside a single session.

use crate::config::LagConfig;
use crate::error::Result;
use crate::lags::LagWindow;
use crate::lead::{lead_values, lead_variance};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A top-of-book quote observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Trading date, used as the grouping key
    pub date: NaiveDate,
    /// Seconds since midnight on `date`
    pub seconds: f64,
    /// Best bid price
    pub bid: f64,
    /// Best ask price
    pub ask: f64,
}

impl Quote {
    /// Creates a new Quote.
    pub fn new(date: NaiveDate, seconds: f64, bid: f64, ask: f64) -> Self {
        Quote {
            date,
            seconds,
            bid,
            ask,
        }
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    pub fn midpoint(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }
}

/// Lead features for one quote. Fields are `NaN` when the quote has no window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadFeatureRow {
    /// Row index of the window end, `None` for the last quote of a day
    pub window: Option<usize>,
    pub lead_bid: f64,
    pub lead_ask: f64,
    pub lead_spread: f64,
    pub lead_midpoint: f64,
    /// Population variance of the midpoint from this quote through the window end
    pub midpoint_variance: f64,
}

/// Builds [`LeadFeatureRow`]s for a slice of quotes.
#[derive(Debug, Clone, Copy)]
pub struct LeadFeatures {
    window: LagWindow,
}

impl LeadFeatures {
    pub fn new(window: LagWindow) -> Self {
        LeadFeatures { window }
    }

    pub fn from_config(config: LagConfig) -> Result<Self> {
        Ok(LeadFeatures::new(config.build()?))
    }

    /// Computes one row per quote, in input order.
    ///
    /// Quotes must be sorted by `seconds` within each date, and quotes of the
    /// same date must be contiguous.
    pub fn compute(&self, quotes: &[Quote]) -> Result<Vec<LeadFeatureRow>> {
        let seconds: Vec<f64> = quotes.iter().map(|q| q.seconds).collect();
        let dates: Vec<NaiveDate> = quotes.iter().map(|q| q.date).collect();
        let windows = self.window.compute_grouped(&seconds, &dates)?;

        let midpoints = column(quotes, Quote::midpoint);

        let lead_bid = lead_values(&windows, &column(quotes, |q| q.bid))?;
        let lead_ask = lead_values(&windows, &column(quotes, |q| q.ask))?;
        let lead_spread = lead_values(&windows, &column(quotes, Quote::spread))?;
        let lead_midpoint = lead_values(&windows, &midpoints)?;
        let midpoint_variance = lead_variance(&windows, &midpoints)?;

        debug!(
            quotes = quotes.len(),
            lag_length = self.window.lag_length(),
            "computed lead features"
        );

        let rows = (0..quotes.len())
            .map(|row| LeadFeatureRow {
                window: windows[row],
                lead_bid: lead_bid[row],
                lead_ask: lead_ask[row],
                lead_spread: lead_spread[row],
                lead_midpoint: lead_midpoint[row],
                midpoint_variance: midpoint_variance[row],
            })
            .collect();

        Ok(rows)
    }
}

fn column(quotes: &[Quote], field: fn(&Quote) -> f64) -> Vec<f64> {
    quotes.iter().map(field).collect()
}
