//! A mini-profiler logging laps and overall time
//!
//! ```
//! use sundry::stopwatch::StopWatch;
//!
//! let mut watch = StopWatch::new("rebuild_index");
//! // ... first phase ...
//! watch.lap("loaded");
//! // ... second phase ...
//! watch.lap("sorted");
//! // dropping the watch logs the overall time
//! ```

use std::cell::Cell;
use std::time::{Duration, Instant};

use tracing::info;

thread_local! {
    static NESTING_DEPTH: Cell<usize> = const { Cell::new(0) };
}

const NESTING_DELTA: usize = 2;

/// Logs the time between laps and the overall time on drop
///
/// Watches running within the scope of another watch (on the same
/// thread) log with increased indentation, so nested measurements
/// stay readable.
pub struct StopWatch {
    label: String,
    start: Instant,
    last: Instant,
    laps: Vec<(String, Duration)>,
    nesting: usize,
    enabled: bool,
}

impl StopWatch {
    pub fn new(label: &str) -> Self {
        Self::if_enabled(label, true)
    }

    /// A watch that can be turned into a no-op, e.g. outside of
    /// debugging sessions
    pub fn if_enabled(label: &str, enable: bool) -> Self {
        let now = Instant::now();
        let nesting = NESTING_DEPTH.get();
        if enable {
            info!(watch = %label, indent = nesting, "START [");
            NESTING_DEPTH.set(nesting + NESTING_DELTA);
        }
        Self {
            label: label.to_string(),
            start: now,
            last: now,
            laps: Vec::new(),
            nesting,
            enabled: enable,
        }
    }

    /// Record and log the time since the last lap (or the start)
    pub fn lap(&mut self, txt: &str) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;
        self.log_lap(txt, delta);
        self.laps.push((txt.to_string(), delta));
        delta
    }

    fn log_lap(&self, txt: &str, delta: Duration) {
        info!(
            watch = %self.label,
            indent = self.nesting,
            secs = delta.as_secs_f64(),
            "{txt}"
        );
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The laps recorded so far
    pub fn laps(&self) -> &[(String, Duration)] {
        &self.laps
    }
}

impl Drop for StopWatch {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }
        NESTING_DEPTH.set(self.nesting);
        if !self.laps.is_empty() {
            let delta = self.last.elapsed();
            self.log_lap("(last delta)", delta);
        }
        self.log_lap("(overall time)", self.start.elapsed());
        info!(watch = %self.label, indent = self.nesting, "END ]");
    }
}

impl std::fmt::Debug for StopWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopWatch")
            .field("label", &self.label)
            .field("laps", &self.laps.len())
            .finish()
    }
}

/// Run a closure under a stopwatch
///
/// The counterpart to wrapping a whole function; no laps, just the
/// overall time.
///
/// ```
/// use sundry::stopwatch::timed;
///
/// let answer = timed("compute", || 6 * 7);
/// assert_eq!(answer, 42);
/// ```
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let _watch = StopWatch::new(label);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laps_accumulate() {
        let mut watch = StopWatch::new("test");
        watch.lap("first");
        watch.lap("second");
        assert_eq!(watch.laps().len(), 2);
        assert_eq!(watch.laps()[0].0, "first");
        assert!(watch.elapsed() >= watch.laps()[0].1);
    }

    #[test]
    fn test_nesting_depth_restored() {
        assert_eq!(NESTING_DEPTH.get(), 0);
        {
            let _outer = StopWatch::new("outer");
            assert_eq!(NESTING_DEPTH.get(), NESTING_DELTA);
            {
                let _inner = StopWatch::new("inner");
                assert_eq!(NESTING_DEPTH.get(), 2 * NESTING_DELTA);
            }
            assert_eq!(NESTING_DEPTH.get(), NESTING_DELTA);
        }
        assert_eq!(NESTING_DEPTH.get(), 0);
    }

    #[test]
    fn test_disabled_watch_is_inert() {
        let depth = NESTING_DEPTH.get();
        let mut watch = StopWatch::if_enabled("quiet", false);
        assert_eq!(watch.lap("ignored"), Duration::ZERO);
        assert!(watch.laps().is_empty());
        assert_eq!(NESTING_DEPTH.get(), depth);
    }

    #[test]
    fn test_timed_passes_result_through() {
        assert_eq!(timed("add", || 1 + 2), 3);
    }
}
