//! Thread-safe render progress counter.
//!
//! Purely diagnostic: render output never depends on it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts rendered pixels and logs each time another `interval` percent is done.
#[derive(Debug, Default)]
pub struct Progress {
    done: AtomicU64,
    total: AtomicU64,
    /// Last reported step, in units of the print interval
    reported: AtomicU64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the counter for a render of `total` pixels.
    pub fn reset(&self, total: u64) {
        self.done.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
        self.reported.store(0, Ordering::Relaxed);
    }

    /// Record `pixels` more rendered pixels.
    ///
    /// With a positive `interval` (in percent), logs once per interval crossed.
    pub fn advance(&self, pixels: u64, interval: f64) {
        let done = self.done.fetch_add(pixels, Ordering::Relaxed) + pixels;
        let total = self.total.load(Ordering::Relaxed);
        if interval <= 0.0 || total == 0 {
            return;
        }

        let percent = done as f64 * 100.0 / total as f64;
        let step = (percent / interval).floor() as u64;
        let previous = self.reported.fetch_max(step, Ordering::Relaxed);
        if step > previous {
            log::info!("Rendered {:.1}% ({}/{} pixels)", percent, done, total);
        }
    }

    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Completed fraction in `[0, 1]`; zero before a render starts.
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.done() as f64 / total as f64).min(1.0)
    }
}
