//! Forward lag windows over sorted timestamps
//!
//! For every position `i` of an ascending timestamp series, the window end is
//! the last index `j >= i` such that every timestamp in `i + 1..=j` is strictly
//! below `timestamps[i] + lag_length`. A later timestamp landing exactly on the
//! threshold closes the window. The final position has no later data to look
//! at and carries the [`NO_WINDOW`] sentinel (`None` in the owned form).

use crate::config::{LagConfig, ScanMode};
use crate::error::{LagError, Result};
use tracing::{debug, warn};

/// Sentinel written to the caller buffer for positions without a window.
pub const NO_WINDOW: i32 = -1;

/// Fills `out` with the window end of every position in `input`.
///
/// Convenience wrapper around [`LagWindow::fill`] with the default sweep scan
/// and no sortedness validation.
///
/// # Arguments
/// * `input` - Timestamps sorted ascending
/// * `lag_length` - Forward window length, same unit as `input`
/// * `out` - Caller-owned buffer, must have the same length as `input`
///
/// # Behavior
/// - `out[i]` for `i < n - 1` is the index just before the first later
///   timestamp that reaches `input[i] + lag_length`, or `n - 1` if none does
/// - `out[n - 1]` is set to [`NO_WINDOW`]
/// - When `n < 2` nothing is written
///
/// # Errors
/// Returns an error without touching `out` if the lag length is negative or
/// not finite, or if `out` has the wrong length.
///
/// # Examples
/// ```
/// use lag_windows::lags::{fill_lags, NO_WINDOW};
///
/// let times = [0.001, 0.002, 0.003, 0.005, 0.006, 0.008, 0.011, 0.014, 0.015, 0.017];
/// let mut out = [0i32; 10];
/// fill_lags(&times, 0.003, &mut out).unwrap();
///
/// assert_eq!(out, [2, 2, 3, 4, 5, 5, 6, 8, 9, NO_WINDOW]);
/// ```
pub fn fill_lags(input: &[f64], lag_length: f64, out: &mut [i32]) -> Result<()> {
    LagWindow::new(lag_length)?.fill(input, out)
}

/// Returns the window end of every position in `input`, `None` for the last.
///
/// # Examples
/// ```
/// use lag_windows::lags::compute_lags;
///
/// let windows = compute_lags(&[1.0, 2.0, 4.0], 1.5).unwrap();
/// assert_eq!(windows, vec![Some(1), Some(1), None]);
/// ```
pub fn compute_lags(input: &[f64], lag_length: f64) -> Result<Vec<Option<usize>>> {
    LagWindow::new(lag_length)?.compute(input)
}

/// A validated lag window computer.
///
/// Holds no state between calls, so one instance can be shared freely across
/// threads working on disjoint buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagWindow {
    lag_length: f64,
    scan: ScanMode,
    validate_sorted: bool,
}

impl LagWindow {
    /// Creates a sweep-mode computer with the given lag length.
    pub fn new(lag_length: f64) -> Result<Self> {
        Self::from_config(LagConfig::new(lag_length))
    }

    pub fn from_config(config: LagConfig) -> Result<Self> {
        if !config.lag_length.is_finite() || config.lag_length < 0.0 {
            warn!(lag_length = config.lag_length, "rejecting lag length");
            return Err(LagError::InvalidLagLength(config.lag_length));
        }

        Ok(LagWindow {
            lag_length: config.lag_length,
            scan: config.scan,
            validate_sorted: config.validate_sorted,
        })
    }

    pub fn lag_length(&self) -> f64 {
        self.lag_length
    }

    pub fn scan(&self) -> ScanMode {
        self.scan
    }

    pub fn validates_sorted(&self) -> bool {
        self.validate_sorted
    }

    /// Writes window ends into a caller-owned `i32` buffer.
    ///
    /// See [`fill_lags`] for the exact contract. The buffer is left untouched
    /// on error and when `input.len() < 2`.
    pub fn fill(&self, input: &[f64], out: &mut [i32]) -> Result<()> {
        if out.len() != input.len() {
            return Err(LagError::BufferLength {
                expected: input.len(),
                actual: out.len(),
            });
        }
        if i32::try_from(input.len()).is_err() {
            return Err(LagError::IndexOverflow { len: input.len() });
        }
        self.check_input(input)?;

        debug!(
            len = input.len(),
            lag_length = self.lag_length,
            mode = %self.scan,
            "filling lag windows"
        );

        if input.len() < 2 {
            return Ok(());
        }

        // Indices fit in i32, checked above.
        self.scan_with(input, |i, end| out[i] = end as i32);
        out[input.len() - 1] = NO_WINDOW;

        Ok(())
    }

    /// Returns window ends as an owned vector, `None` where there is no window.
    ///
    /// Inputs shorter than two elements yield all `None`.
    pub fn compute(&self, input: &[f64]) -> Result<Vec<Option<usize>>> {
        self.check_input(input)?;

        debug!(
            len = input.len(),
            lag_length = self.lag_length,
            mode = %self.scan,
            "computing lag windows"
        );

        let mut windows = vec![None; input.len()];
        self.scan_with(input, |i, end| windows[i] = Some(end));
        Ok(windows)
    }

    /// Window end of a single position, scanning forward from `index + 1`.
    ///
    /// Returns `None` for the last position and for out-of-range indices.
    pub fn window_end(&self, input: &[f64], index: usize) -> Option<usize> {
        if index >= input.len().saturating_sub(1) {
            return None;
        }
        Some(scan_from(input, input[index] + self.lag_length, index + 1))
    }

    pub(crate) fn check_input(&self, input: &[f64]) -> Result<()> {
        if !self.validate_sorted {
            return Ok(());
        }
        validate_sorted(input).inspect_err(|err| {
            warn!(len = input.len(), error = %err, "rejecting timestamps");
        })
    }

    /// Runs the configured scan, calling `emit(i, end)` for `i in 0..n-1`.
    pub(crate) fn scan_with<F>(&self, input: &[f64], emit: F)
    where
        F: FnMut(usize, usize),
    {
        match self.scan {
            ScanMode::Restart => restart_scan(input, self.lag_length, emit),
            ScanMode::Sweep => sweep_scan(input, self.lag_length, emit),
        }
    }
}

/// Checks that every timestamp is finite and none decreases.
pub fn validate_sorted(input: &[f64]) -> Result<()> {
    for (index, value) in input.iter().enumerate() {
        if !value.is_finite() {
            return Err(LagError::NonFiniteTimestamp { index });
        }
        if index > 0 && *value < input[index - 1] {
            return Err(LagError::Unsorted { index });
        }
    }
    Ok(())
}

/// Advances from `start` while the threshold exceeds the timestamp and
/// returns the last index still inside the window. Requires `start >= 1`.
fn scan_from(input: &[f64], threshold: f64, start: usize) -> usize {
    let mut current = start;
    while current < input.len() && threshold > input[current] {
        current += 1;
    }
    current - 1
}

fn restart_scan<F>(input: &[f64], lag_length: f64, mut emit: F)
where
    F: FnMut(usize, usize),
{
    let n = input.len();
    if n < 2 {
        return;
    }

    for i in 0..n - 1 {
        let threshold = input[i] + lag_length;
        emit(i, scan_from(input, threshold, i + 1));
    }
}

// Thresholds never decrease along sorted input, so every index the previous
// scan stepped over is also inside the current window.
fn sweep_scan<F>(input: &[f64], lag_length: f64, mut emit: F)
where
    F: FnMut(usize, usize),
{
    let n = input.len();
    if n < 2 {
        return;
    }

    let mut cursor = 1;
    for i in 0..n - 1 {
        let threshold = input[i] + lag_length;
        cursor = cursor.max(i + 1);
        while cursor < n && threshold > input[cursor] {
            cursor += 1;
        }
        emit(i, cursor - 1);
    }
}
