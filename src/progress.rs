//! Coarse progress reporting for the long-running load phases.
//!
//! Ingestion, finalization and dominator construction can take a while on heaps with
//! millions of objects. Each phase drives a [`Progress`] tracker which forwards percent
//! changes to a [`ProgressObserver`]. Reporting is purely informational and has no
//! influence on the computed results.
//!
//! - [`NoProgress`] - Discards all updates
//! - [`LogProgress`] - Forwards updates to the `log` facade

/// Receives progress notifications, one phase at a time.
///
/// Phases are identified by short static names such as `"finalizing graph"`. Within a
/// phase, `update` is only called when the integer percentage changes.
pub trait ProgressObserver {
    /// A phase started.
    fn begin(&mut self, _phase: &'static str) {}

    /// The phase reached `percent` (0 to 100).
    fn update(&mut self, phase: &'static str, percent: u8);

    /// The phase completed.
    fn finish(&mut self, _phase: &'static str) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&mut self, _phase: &'static str, _percent: u8) {}
}

/// Observer that reports phase boundaries at `info` and percent steps at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn begin(&mut self, phase: &'static str) {
        log::info!("{phase}: started");
    }

    fn update(&mut self, phase: &'static str, percent: u8) {
        log::debug!("{phase} ({percent}%)");
    }

    fn finish(&mut self, phase: &'static str) {
        log::info!("{phase}: done");
    }
}

/// Tracks the position within one phase and notifies an observer on percent changes.
///
/// # Examples
///
/// ```rust
/// use heapscope::progress::{Progress, ProgressObserver};
///
/// #[derive(Default)]
/// struct Collect(Vec<u8>);
///
/// impl ProgressObserver for Collect {
///     fn update(&mut self, _phase: &'static str, percent: u8) {
///         self.0.push(percent);
///     }
/// }
///
/// let mut observer = Collect::default();
/// let mut progress = Progress::new(&mut observer, "work", 4);
/// for _ in 0..4 {
///     progress.increment();
/// }
/// progress.complete();
/// assert_eq!(observer.0, vec![0, 25, 50, 75, 100]);
/// ```
pub struct Progress<'a> {
    observer: &'a mut dyn ProgressObserver,
    phase: &'static str,
    current: u64,
    total: u64,
    percent: Option<u8>,
}

impl<'a> Progress<'a> {
    /// Starts a phase of `total` steps and reports 0%.
    ///
    /// A `total` of 0 means the length of the phase is unknown. Such a phase reports 0%
    /// when it starts and 100% when it completes, nothing in between.
    pub fn new(observer: &'a mut dyn ProgressObserver, phase: &'static str, total: u64) -> Self {
        observer.begin(phase);
        let mut progress = Progress {
            observer,
            phase,
            current: 0,
            total,
            percent: None,
        };
        progress.report(0);
        progress
    }

    /// Advances by one step.
    pub fn increment(&mut self) {
        self.set(self.current.saturating_add(1));
    }

    /// Moves to an absolute position.
    pub fn set(&mut self, position: u64) {
        self.current = position;
        if self.total == 0 {
            return;
        }

        let scaled = u128::from(position.min(self.total)) * 100 / u128::from(self.total);
        self.report(u8::try_from(scaled).unwrap_or(100));
    }

    /// Reports 100% and ends the phase.
    pub fn complete(mut self) {
        self.current = self.total;
        self.report(100);
        self.observer.finish(self.phase);
    }

    fn report(&mut self, percent: u8) {
        if self.percent != Some(percent) {
            self.percent = Some(percent);
            self.observer.update(self.phase, percent);
        }
    }
}
