//! Progress reporting for long-running operations.
//!
//! Welding and the processing pipeline accept a [`Progress`] and call it as
//! they advance. The pipeline hands each stage a [`Progress::stage`] view, so
//! a stage reporting its own `current / total` lands in the right slice of the
//! overall run.
//!
//! # Example
//!
//! ```
//! use tessel::algo::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! });
//! progress.report(1, 4, "computing facet normals");
//! ```

/// A progress callback.
///
/// The callback receives the current step, the total number of steps and a
/// description of the current operation.
pub struct Progress<'a> {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync + 'a>,
}

impl<'a> Progress<'a> {
    /// Create a progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'a,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// A reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Report progress within stage `index` of `count`.
    ///
    /// `sub_current / sub_total` is mapped onto `[index, index + 1)` out of
    /// `count`, in thousandths. Empty ranges are ignored.
    #[inline]
    pub fn report_within(
        &self,
        sub_current: usize,
        sub_total: usize,
        index: usize,
        count: usize,
        message: &str,
    ) {
        if sub_total == 0 || count == 0 {
            return;
        }
        let fraction = (sub_current.min(sub_total) * 1000) / sub_total;
        (self.callback)(index * 1000 + fraction, count * 1000, message);
    }

    /// A reporter for stage `index` of `count` that forwards to this one.
    pub fn stage(&self, index: usize, count: usize) -> Progress<'_> {
        Progress::new(move |current, total, message| {
            self.report_within(current, total, index, count, message)
        })
    }
}

impl Default for Progress<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
