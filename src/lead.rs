//! Lead features over forward windows
//!
//! Once the lag scan has produced a window end for each row, a feature column
//! can be projected forward: the value at the window end (lead value) or a
//! statistic over `values[i..=end]` (forward variance). Rows carrying the
//! no-window sentinel produce `NaN`.

pub mod primitives;

use crate::error::{LagError, Result};
use primitives::{last_value, population_variance};
use tracing::debug;

/// Stateless analytic evaluated over a forward window slice.
pub trait ForwardAnalytic: Send + Sync {
    fn name(&self) -> &'static str;
    fn compute(&self, window: &[f64]) -> f64;
}

/// Value at the end of the window.
pub struct LeadValue;

impl ForwardAnalytic for LeadValue {
    fn name(&self) -> &'static str {
        "lead_value"
    }

    fn compute(&self, window: &[f64]) -> f64 {
        last_value(window)
    }
}

/// Population variance over the whole window, current row included.
pub struct ForwardVariance;

impl ForwardAnalytic for ForwardVariance {
    fn name(&self) -> &'static str {
        "forward_variance"
    }

    fn compute(&self, window: &[f64]) -> f64 {
        population_variance(window)
    }
}

/// Applies `analytic` to `values[i..=windows[i]]` for every row.
///
/// # Arguments
/// * `windows` - Window ends as returned by [`crate::lags::compute_lags`]
/// * `values` - Feature column aligned with the timestamps
/// * `analytic` - Primitive evaluated on each forward slice
///
/// # Behavior
/// - `None` windows produce `NaN`
/// - Window ends outside `values`, or before their own row, produce `NaN`
///
/// # Errors
/// Returns [`LagError::LengthMismatch`] if `values` is not aligned with
/// `windows`.
pub fn apply_forward<A>(windows: &[Option<usize>], values: &[f64], analytic: &A) -> Result<Vec<f64>>
where
    A: ForwardAnalytic + ?Sized,
{
    if values.len() != windows.len() {
        return Err(LagError::LengthMismatch {
            what: "values",
            expected: windows.len(),
            actual: values.len(),
        });
    }

    debug!(
        len = windows.len(),
        analytic = analytic.name(),
        "applying forward analytic"
    );

    let result = windows
        .iter()
        .copied()
        .enumerate()
        .map(|(row, window)| {
            window
                .filter(|&end| end >= row)
                .and_then(|end| values.get(row..=end))
                .map_or(f64::NAN, |slice| analytic.compute(slice))
        })
        .collect();

    Ok(result)
}

/// Value of `values` at each row's window end.
///
/// # Examples
/// ```
/// use lag_windows::lead::lead_values;
///
/// let windows = [Some(1), Some(2), None];
/// let spreads = [0.01, 0.02, 0.03];
/// let lead = lead_values(&windows, &spreads).unwrap();
///
/// assert_eq!(&lead[..2], &[0.02, 0.03]);
/// assert!(lead[2].is_nan());
/// ```
pub fn lead_values(windows: &[Option<usize>], values: &[f64]) -> Result<Vec<f64>> {
    apply_forward(windows, values, &LeadValue)
}

/// Population variance of `values` from each row through its window end.
pub fn lead_variance(windows: &[Option<usize>], values: &[f64]) -> Result<Vec<f64>> {
    apply_forward(windows, values, &ForwardVariance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lags::compute_lags;
    use crate::testing::WORKED_EXAMPLE;
    use assert_approx_eq::assert_approx_eq;

    fn midpoints() -> Vec<f64> {
        vec![10.0, 10.5, 11.0, 10.0, 10.0, 10.25, 9.75, 9.5, 9.5, 10.0]
    }

    #[test]
    fn lead_values_follow_worked_example_windows() {
        let windows = compute_lags(&WORKED_EXAMPLE, 0.003).unwrap();
        let lead = lead_values(&windows, &midpoints()).unwrap();
        let expected = [11.0, 11.0, 10.0, 10.0, 10.25, 10.25, 9.75, 9.5, 10.0];
        assert_eq!(&lead[..9], &expected);
        assert!(lead[9].is_nan());
    }

    #[test]
    fn lead_variance_covers_current_row_through_window_end() {
        let windows = compute_lags(&WORKED_EXAMPLE, 0.003).unwrap();
        let variance = lead_variance(&windows, &midpoints()).unwrap();

        // Row 0 spans rows 0..=2: 10.0, 10.5, 11.0
        assert_approx_eq!(variance[0], 1.0 / 6.0);
        // Row 6 window ends on itself
        assert!(variance[6].is_nan());
        // Row 7 spans 9.5, 9.5
        assert_eq!(variance[7], 0.0);
        assert!(variance[9].is_nan());
    }

    #[test]
    fn misaligned_columns_are_rejected() {
        let err = lead_values(&[Some(1), None], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            LagError::LengthMismatch {
                what: "values",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn out_of_range_windows_yield_nan() {
        let lead = lead_values(&[Some(5), Some(0), None], &[1.0, 2.0, 3.0]).unwrap();
        assert!(lead.iter().all(|value| value.is_nan()));
    }

    #[test]
    fn analytics_report_names() {
        assert_eq!(LeadValue.name(), "lead_value");
        assert_eq!(ForwardVariance.name(), "forward_variance");
    }
}
