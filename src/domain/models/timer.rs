#[cfg(test)]
#[path = "timer_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn nominal_duration(&self) -> u64 {
        match self {
            TimerMode::Focus => return 25 * 60,
            TimerMode::ShortBreak => return 5 * 60,
            TimerMode::LongBreak => return 15 * 60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Focus => return "Focus",
            TimerMode::ShortBreak => return "Short Break",
            TimerMode::LongBreak => return "Long Break",
        }
    }
}

/// A pomodoro-style countdown. The timer itself never sleeps; an external
/// driver calls [`CountdownTimer::tick`] once per elapsed second while armed.
#[derive(Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    mode: TimerMode,
    remaining_seconds: u64,
    is_running: bool,
}

impl Default for CountdownTimer {
    fn default() -> CountdownTimer {
        return CountdownTimer {
            mode: TimerMode::Focus,
            remaining_seconds: TimerMode::Focus.nominal_duration(),
            is_running: false,
        };
    }
}

impl CountdownTimer {
    pub fn mode(&self) -> TimerMode {
        return self.mode;
    }

    pub fn remaining_seconds(&self) -> u64 {
        return self.remaining_seconds;
    }

    pub fn is_running(&self) -> bool {
        return self.is_running;
    }

    pub fn start(&mut self) {
        if self.remaining_seconds == 0 {
            return;
        }

        self.is_running = true;
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_seconds = self.mode.nominal_duration();
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.is_running = false;
        self.remaining_seconds = mode.nominal_duration();
    }

    /// Advances the countdown by one second. Returns true exactly when this
    /// tick completes the countdown, so the owner can notify collaborators.
    pub fn tick(&mut self) -> bool {
        if !self.is_running || self.remaining_seconds == 0 {
            return false;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.is_running = false;
            return true;
        }

        return false;
    }

    pub fn clock(&self) -> String {
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        return format!("{minutes:02}:{seconds:02}");
    }

    /// Elapsed fraction of the current mode's nominal duration, in 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        let nominal = self.mode.nominal_duration();
        if nominal == 0 {
            return 0.0;
        }

        return 1.0 - (self.remaining_seconds as f64 / nominal as f64);
    }
}
