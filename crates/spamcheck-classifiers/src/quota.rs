//! Fixed-window request quota

use std::time::Duration;
use tokio::time::Instant;

/// Bounded number of requests per time window.
///
/// The window opens with the first request recorded after the previous
/// window expired; a full window blocks until it expires.
#[derive(Debug, Clone)]
pub struct RequestQuota {
    window_start: Option<Instant>,
    requests_in_window: u32,
    window_capacity: u32,
    window_duration: Duration,
}

impl RequestQuota {
    /// Create a quota of `window_capacity` requests per `window_duration`
    pub fn new(window_capacity: u32, window_duration: Duration) -> Self {
        Self {
            window_start: None,
            requests_in_window: 0,
            window_capacity: window_capacity.max(1),
            window_duration,
        }
    }

    pub fn window_capacity(&self) -> u32 {
        self.window_capacity
    }

    pub fn window_duration(&self) -> Duration {
        self.window_duration
    }

    /// Requests recorded in the current window
    pub fn requests_in_window(&self) -> u32 {
        self.requests_in_window
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.window_start
            .map_or(true, |start| now.saturating_duration_since(start) >= self.window_duration)
    }

    /// How long a request issued at `now` would have to wait
    pub fn wait_time(&self, now: Instant) -> Duration {
        match self.window_start {
            Some(start)
                if !self.is_expired(now) && self.requests_in_window >= self.window_capacity =>
            {
                (start + self.window_duration).saturating_duration_since(now)
            }
            _ => Duration::ZERO,
        }
    }

    /// Record a request issued at `now`, opening a new window if the current one expired
    pub fn record(&mut self, now: Instant) {
        if self.is_expired(now) {
            self.window_start = Some(now);
            self.requests_in_window = 0;
        }
        self.requests_in_window += 1;
    }
}
