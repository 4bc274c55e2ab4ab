/// What a single tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is not running; nothing changed.
    Idle,
    /// One second was consumed; carries the seconds left.
    Running(u32),
    /// This tick consumed the last second. Reported once.
    Expired,
}

/// Session countdown, gated by an explicit running flag.
///
/// The countdown is created once per session and only started and stopped;
/// it is never rebuilt mid-session, so the remaining time cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            running: false,
        }
    }

    /// Start counting. Has no effect once the countdown has expired.
    pub fn start(&mut self) {
        if self.remaining_secs > 0 {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining_secs)
        }
    }

    #[must_use]
    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.total_secs - self.remaining_secs
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Formats seconds as `h:mm:ss`, or `m:ss` under an hour.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut countdown = Countdown::new(3);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.remaining_secs(), 3);
    }

    #[test]
    fn expires_exactly_once() {
        let mut countdown = Countdown::new(2);
        countdown.start();
        assert_eq!(countdown.tick(), TickOutcome::Running(1));
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.elapsed_secs(), 2);
        assert!(!countdown.is_running());
    }

    #[test]
    fn restart_after_expiry_is_ignored() {
        let mut countdown = Countdown::new(1);
        countdown.start();
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        countdown.start();
        assert!(!countdown.is_running());
    }

    #[test]
    fn stop_freezes_remaining_time() {
        let mut countdown = Countdown::new(10);
        countdown.start();
        countdown.tick();
        countdown.stop();
        countdown.tick();
        assert_eq!(countdown.remaining_secs(), 9);
    }

    #[test]
    fn formats_clock() {
        assert_eq!(format_clock(3600), "1:00:00");
        assert_eq!(format_clock(1800), "30:00");
        assert_eq!(format_clock(65), "1:05");
    }
}
