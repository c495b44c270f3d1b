//! Event-stream throttling
//!
//! Timestamps are supplied by the caller (`performance.now()` in the browser),
//! which keeps these types deterministic under test.

/// Leading + trailing edge throttle
///
/// The first call in a quiet period fires immediately. Calls inside the wait
/// window are folded into a single trailing call, released by `poll` once the
/// window has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    wait_ms: f64,
    last_fired: Option<f64>,
    pending: bool,
}

impl Throttle {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            last_fired: None,
            pending: false,
        }
    }

    /// Record a call at `now_ms`, returning true if it should run now
    pub fn call(&mut self, now_ms: f64) -> bool {
        if self.window_elapsed(now_ms) {
            self.fire(now_ms);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Release a deferred trailing call, returning true if it should run now
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if self.pending && self.window_elapsed(now_ms) {
            self.fire(now_ms);
            true
        } else {
            false
        }
    }

    fn window_elapsed(&self, now_ms: f64) -> bool {
        self.last_fired.map_or(true, |last| now_ms - last >= self.wait_ms)
    }

    fn fire(&mut self, now_ms: f64) {
        self.last_fired = Some(now_ms);
        self.pending = false;
    }
}

/// Keeps only the latest value per animation frame
#[derive(Debug, Clone, Default)]
pub struct FrameSampler<T> {
    latest: Option<T>,
}

impl<T> FrameSampler<T> {
    pub fn new() -> Self {
        Self { latest: None }
    }

    /// Record a sample, replacing any earlier one from the same frame
    pub fn sample(&mut self, value: T) {
        self.latest = Some(value);
    }

    /// Take the frame's sample, if any
    pub fn take(&mut self) -> Option<T> {
        self.latest.take()
    }
}
