//! Stateless primitives evaluated over forward windows.
//!
//! These are pure functions on slices; `lead` pairs them with the window ends
//! produced by the lag scan.

/// Last value of the window, `f64::NAN` for an empty window.
pub fn last_value(window: &[f64]) -> f64 {
    window.last().copied().unwrap_or(f64::NAN)
}

/// Population variance of the available (non-NaN) values.
///
/// Returns `f64::NAN` when the window holds at most one observation, so a
/// single quote never reports zero variance. Also `NaN` when every value is
/// missing.
pub fn population_variance(window: &[f64]) -> f64 {
    if window.len() <= 1 {
        return f64::NAN;
    }

    let valid_values: Vec<f64> = window.iter().copied().filter(|v| !v.is_nan()).collect();
    if valid_values.is_empty() {
        return f64::NAN;
    }

    let n = valid_values.len() as f64;
    let mean = valid_values.iter().sum::<f64>() / n;
    valid_values
        .iter()
        .map(|&value| (value - mean).powi(2))
        .sum::<f64>()
        / n
}
