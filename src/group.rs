//! Lag windows computed independently per group
//!
//! Tick series usually span several trading days and a window must never
//! reach into the next day. `keys` labels each row (a date, a symbol, ...);
//! every contiguous run of equal keys is scanned on its own and its last row
//! gets the no-window sentinel. Window ends stay global row indices.
//!
//! Runs share no state, so they are scanned in parallel on disjoint output
//! slices.

use crate::error::{LagError, Result};
use crate::lags::{LagWindow, NO_WINDOW};
use rayon::prelude::*;
use std::ops::Range;
use tracing::{debug, trace};

/// Splits `keys` into contiguous runs of equal values.
///
/// Non-adjacent repeats of a key form separate runs.
pub fn group_runs<K: PartialEq>(keys: &[K]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;

    for index in 1..=keys.len() {
        if index == keys.len() || keys[index] != keys[index - 1] {
            runs.push(start..index);
            start = index;
        }
    }

    runs
}

/// Per-group window ends with a sweep scan.
///
/// # Examples
/// ```
/// use lag_windows::group::lags_by_group;
///
/// let seconds = [1.0, 2.0, 3.0, 1.0, 2.0];
/// let days = ["mon", "mon", "mon", "tue", "tue"];
/// let windows = lags_by_group(&seconds, &days, 5.0).unwrap();
///
/// assert_eq!(windows, vec![Some(2), Some(2), None, Some(4), None]);
/// ```
pub fn lags_by_group<K>(times: &[f64], keys: &[K], lag_length: f64) -> Result<Vec<Option<usize>>>
where
    K: PartialEq + Sync,
{
    LagWindow::new(lag_length)?.compute_grouped(times, keys)
}

impl LagWindow {
    /// Window ends computed separately for each run of equal `keys`.
    ///
    /// Single-row runs yield `None`. Validation, when enabled, applies to
    /// each run on its own.
    pub fn compute_grouped<K>(&self, times: &[f64], keys: &[K]) -> Result<Vec<Option<usize>>>
    where
        K: PartialEq + Sync,
    {
        let runs = self.prepare_runs(times, keys)?;

        let per_run: Vec<Vec<Option<usize>>> = runs
            .par_iter()
            .map(|run| {
                trace!(start = run.start, len = run.len(), "scanning group");
                let mut windows = vec![None; run.len()];
                self.scan_with(&times[run.clone()], |i, end| {
                    windows[i] = Some(run.start + end)
                });
                windows
            })
            .collect();

        Ok(per_run.into_iter().flatten().collect())
    }

    /// Buffer form of [`LagWindow::compute_grouped`].
    ///
    /// The last row of every run, single-row runs included, receives
    /// [`NO_WINDOW`]. Nothing is written on error.
    pub fn fill_grouped<K>(&self, times: &[f64], keys: &[K], out: &mut [i32]) -> Result<()>
    where
        K: PartialEq + Sync,
    {
        if out.len() != times.len() {
            return Err(LagError::BufferLength {
                expected: times.len(),
                actual: out.len(),
            });
        }
        if i32::try_from(times.len()).is_err() {
            return Err(LagError::IndexOverflow { len: times.len() });
        }
        let runs = self.prepare_runs(times, keys)?;

        let mut chunks = Vec::with_capacity(runs.len());
        let mut rest = out;
        for run in runs {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(run.len());
            chunks.push((run, head));
            rest = tail;
        }

        chunks.into_par_iter().for_each(|(run, chunk)| {
            trace!(start = run.start, len = run.len(), "filling group");
            self.scan_with(&times[run.clone()], |i, end| {
                chunk[i] = (run.start + end) as i32
            });
            if let Some(last) = chunk.last_mut() {
                *last = NO_WINDOW;
            }
        });

        Ok(())
    }

    fn prepare_runs<K>(&self, times: &[f64], keys: &[K]) -> Result<Vec<Range<usize>>>
    where
        K: PartialEq + Sync,
    {
        if keys.len() != times.len() {
            return Err(LagError::LengthMismatch {
                what: "keys",
                expected: times.len(),
                actual: keys.len(),
            });
        }

        let runs = group_runs(keys);
        debug!(
            len = times.len(),
            groups = runs.len(),
            lag_length = self.lag_length(),
            mode = %self.scan(),
            "computing grouped lag windows"
        );

        runs.par_iter().try_for_each(|run| {
            self.check_input(&times[run.clone()])
                .map_err(|err| offset_index(err, run.start))
        })?;

        Ok(runs)
    }
}

// Validation reports run-local indices; callers need rows of the full series.
fn offset_index(err: LagError, offset: usize) -> LagError {
    match err {
        LagError::Unsorted { index } => LagError::Unsorted {
            index: index + offset,
        },
        LagError::NonFiniteTimestamp { index } => LagError::NonFiniteTimestamp {
            index: index + offset,
        },
        other => other,
    }
}
