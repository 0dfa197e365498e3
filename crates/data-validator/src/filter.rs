//! Median Despiking for the Heartbeat Channel
//!
//! Doppler heartbeat reads occasionally double or halve for a single sample.
//! A short median window removes those spikes without smearing real trends.

/// Sliding-window median filter
pub struct MedianFilter {
    window: Vec<f64>,
    size: usize,
    seen: usize,
}

impl MedianFilter {
    /// Create a new filter with the given window size (odd, > 0)
    pub fn new(size: usize) -> Self {
        assert!(size > 0 && size % 2 == 1, "window size must be odd and > 0");
        Self {
            window: vec![0.0; size],
            size,
            seen: 0,
        }
    }

    /// Three-sample window, enough for single-sample doubling artifacts
    pub fn for_heartbeat() -> Self {
        Self::new(3)
    }

    /// Add a value and get the filtered output
    ///
    /// Returns the input unchanged until the window has filled once.
    pub fn filter(&mut self, value: f64) -> f64 {
        self.window[self.seen % self.size] = value;
        self.seen += 1;

        if self.seen < self.size {
            return value;
        }

        let mut sorted = self.window.clone();
        sorted.sort_unstable_by(|a, b| a.total_cmp(b));
        sorted[self.size / 2]
    }

    /// Reset the filter
    pub fn reset(&mut self) {
        self.window.fill(0.0);
        self.seen = 0;
    }
}
