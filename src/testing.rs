//! Shared test fixtures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Tick times from the worked example, in seconds.
pub(crate) const WORKED_EXAMPLE: [f64; 10] = [
    0.001, 0.002, 0.003, 0.005, 0.006, 0.008, 0.011, 0.014, 0.015, 0.017,
];

/// Sorted series with repeated values and steps that land exactly on
/// quarter-unit thresholds.
pub(crate) fn sorted_series(seed: u64, len: usize) -> Vec<f64> {
    const STEPS: [f64; 5] = [0.0, 0.25, 0.5, 1.0, 1.75];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut current = rng.random_range(0..100) as f64;
    (0..len)
        .map(|_| {
            current += STEPS[rng.random_range(0..STEPS.len())];
            current
        })
        .collect()
}

/// Quadratic definition of the window end, used as the oracle.
pub(crate) fn brute_force_windows(times: &[f64], lag_length: f64) -> Vec<Option<usize>> {
    let n = times.len();
    (0..n)
        .map(|i| {
            if i + 1 >= n {
                return None;
            }
            let threshold = times[i] + lag_length;
            let end = (i + 1..n)
                .take_while(|&j| times[j] < threshold)
                .last()
                .unwrap_or(i);
            Some(end)
        })
        .collect()
}
