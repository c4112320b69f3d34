//! Wall-Clock Timing
//!
//! Comparisons report elapsed seconds at a fixed four-decimal scale, so the
//! time source only needs a monotonic clock plus the helpers that bring a
//! measurement down to that scale.

use std::time::Duration;

/// Monotonic instant used as the time source for comparison runs
#[derive(Debug, Clone, Copy)]
pub struct Instant {
    instant: std::time::Instant,
}

impl Instant {
    /// Capture current instant
    #[inline(always)]
    pub fn now() -> Self {
        Self {
            instant: std::time::Instant::now(),
        }
    }

    /// Compute elapsed time since this instant
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }
}

/// Timer wrapped around a candidate's whole iteration loop
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return the elapsed wall-clock time
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Truncate `value` toward zero, keeping `places` decimal digits.
///
/// Matches fixed-scale decimal subtraction: `0.12349` becomes `0.1234`.
pub fn truncate_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).trunc() / factor
}

/// Round `value` half away from zero, keeping `places` decimal digits.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    // `+ 0.0` folds -0.0 into 0.0
    (value * factor).round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_elapsed() {
        let start = Instant::now();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = start.elapsed();

        // Should be at least 10ms
        assert!(elapsed >= Duration::from_millis(5));
        // Should be less than 1s (accounting for scheduling)
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_truncate_drops_extra_digits() {
        assert_eq!(truncate_to(0.12349, 4), 0.1234);
        assert_eq!(truncate_to(1.99999, 4), 1.9999);
        assert_eq!(truncate_to(0.0, 4), 0.0);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(0.12345678, 4), 0.1235);
        assert_eq!(round_to(-0.12345678, 4), -0.1235);
        assert_eq!(round_to(2.0, 4), 2.0);
        assert!(round_to(-0.00001, 4).is_sign_positive());
    }
}
