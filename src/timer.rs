/// Result of feeding one second into a [`RoundTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Still counting, with the seconds left after this tick.
    Running(u32),
    /// Hit zero on this tick. Reported once, after which the timer is suspended.
    Expired,
    /// Not counting; the tick was ignored.
    Suspended,
}

/// Per-challenge countdown in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTimer {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl RoundTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: true,
        }
    }

    pub fn on_tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Suspended;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining_secs)
        }
    }

    /// Stop counting without touching the remaining time.
    pub fn suspend(&mut self) {
        self.running = false;
    }

    /// Refill to the configured duration and start counting again.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.running = true;
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs - self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of the duration still left, for progress bars.
    pub fn ratio_remaining(&self) -> f64 {
        if self.duration_secs == 0 {
            0.0
        } else {
            self.remaining_secs as f64 / self.duration_secs as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_new() {
        let timer = RoundTimer::new(30);
        assert_eq!(timer.remaining_secs(), 30);
        assert_eq!(timer.duration_secs(), 30);
        assert_eq!(timer.elapsed_secs(), 0);
        assert!(timer.is_running());
        assert_eq!(timer.ratio_remaining(), 1.0);
    }

    #[test]
    fn test_timer_counts_down() {
        let mut timer = RoundTimer::new(3);
        assert_eq!(timer.on_tick(), TimerTick::Running(2));
        assert_eq!(timer.on_tick(), TimerTick::Running(1));
        assert_eq!(timer.elapsed_secs(), 2);
    }

    #[test]
    fn test_timer_expires_exactly_once() {
        let mut timer = RoundTimer::new(2);
        assert_eq!(timer.on_tick(), TimerTick::Running(1));
        assert_eq!(timer.on_tick(), TimerTick::Expired);
        assert_eq!(timer.on_tick(), TimerTick::Suspended);
        assert_eq!(timer.on_tick(), TimerTick::Suspended);
        assert_eq!(timer.remaining_secs(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_suspended_timer_does_not_count() {
        let mut timer = RoundTimer::new(10);
        timer.on_tick();
        timer.suspend();

        assert_eq!(timer.on_tick(), TimerTick::Suspended);
        assert_eq!(timer.remaining_secs(), 9);
    }

    #[test]
    fn test_reset_refills_and_resumes() {
        let mut timer = RoundTimer::new(2);
        timer.on_tick();
        timer.on_tick();
        assert!(!timer.is_running());

        timer.reset();
        assert_eq!(timer.remaining_secs(), 2);
        assert!(timer.is_running());
        assert_eq!(timer.on_tick(), TimerTick::Running(1));
    }

    #[test]
    fn test_zero_duration_expires_on_first_tick() {
        let mut timer = RoundTimer::new(0);
        assert_eq!(timer.ratio_remaining(), 0.0);
        assert_eq!(timer.on_tick(), TimerTick::Expired);
    }
}
