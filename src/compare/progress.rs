use std::time::{Duration, Instant};

use derive_more::Display;

/// Minimum time between two progress lines
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{processed} processed, {depth}/{capacity} queued")]
pub struct SideProgress {
    pub processed: u64,
    pub depth: usize,
    pub capacity: usize,
}

/// Snapshot of both sides, printed in verbose mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("left: {left}, right: {right}")]
pub struct Progress {
    pub left: SideProgress,
    pub right: SideProgress,
}

/// Rate limiter for progress lines. The first check always passes.
#[derive(Debug)]
pub struct ProgressThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl ProgressThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn is_due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_fires_once_per_interval() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(5));
        let start = Instant::now();

        assert!(throttle.is_due(start));
        assert!(!throttle.is_due(start + Duration::from_secs(1)));
        assert!(!throttle.is_due(start + Duration::from_millis(4999)));
        assert!(throttle.is_due(start + Duration::from_secs(5)));
        assert!(!throttle.is_due(start + Duration::from_secs(6)));
    }

    #[test]
    fn test_progress_line_format() {
        let progress = Progress {
            left: SideProgress {
                processed: 12,
                depth: 3,
                capacity: 1000,
            },
            right: SideProgress {
                processed: 10,
                depth: 0,
                capacity: 1000,
            },
        };

        assert_eq!(
            progress.to_string(),
            "left: 12 processed, 3/1000 queued, right: 10 processed, 0/1000 queued"
        );
    }
}
