use std::fmt;
use std::time::Duration;

/// Ring buffer of recent frame durations.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: Vec<Duration>,
    next: usize,
    recorded: u64,
}

impl FrameTimer {
    /// Keep the last `capacity` frames. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![Duration::ZERO; capacity.max(1)],
            next: 0,
            recorded: 0,
        }
    }

    pub fn record(&mut self, frame: Duration) {
        self.samples[self.next] = frame;
        self.next = (self.next + 1) % self.samples.len();
        self.recorded += 1;
    }

    /// Samples currently held, in slot order.
    fn window(&self) -> &[Duration] {
        let held = (self.recorded as usize).min(self.samples.len());
        &self.samples[..held]
    }

    pub fn average(&self) -> Duration {
        let window = self.window();
        if window.is_empty() {
            return Duration::ZERO;
        }
        window.iter().sum::<Duration>() / window.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.window().iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.window().iter().copied().max().unwrap_or_default()
    }

    /// Number of samples in the window.
    pub fn count(&self) -> usize {
        self.window().len()
    }

    /// Frames recorded since creation, including those rotated out.
    pub fn total_recorded(&self) -> u64 {
        self.recorded
    }

    pub fn last(&self) -> Option<Duration> {
        if self.recorded == 0 {
            return None;
        }
        let len = self.samples.len();
        Some(self.samples[(self.next + len - 1) % len])
    }
}

impl fmt::Display for FrameTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames={} avg={:?} min={:?} max={:?}",
            self.recorded,
            self.average(),
            self.min(),
            self.max()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new(4);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.max(), Duration::ZERO);
        assert_eq!(timer.last(), None);
    }

    #[test]
    fn tracks_partial_window() {
        let mut timer = FrameTimer::new(8);
        timer.record(ms(4));
        timer.record(ms(8));
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), ms(6));
        assert_eq!(timer.min(), ms(4));
        assert_eq!(timer.last(), Some(ms(8)));
    }

    #[test]
    fn oldest_sample_rotates_out() {
        let mut timer = FrameTimer::new(2);
        timer.record(ms(10));
        timer.record(ms(20));
        timer.record(ms(30));
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.total_recorded(), 3);
        assert_eq!(timer.average(), ms(25));
        assert_eq!(timer.min(), ms(20));
        assert_eq!(timer.last(), Some(ms(30)));
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut timer = FrameTimer::new(0);
        timer.record(ms(5));
        timer.record(ms(7));
        assert_eq!(timer.count(), 1);
        assert_eq!(timer.max(), ms(7));
    }
}
