use std::time::Duration;

/// Wall-clock spacing between two ticks of a running clock.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ClockState {
    Stopped,
    Running,
}

/// What a single tick did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock was not running; nothing changed.
    Idle,
    /// One second elapsed and time is left.
    Ticked,
    /// The clock reached zero and stopped itself. Reported once per run.
    Expired,
}

/// Countdown in whole seconds.
///
/// The clock only keeps count; the caller decides when a second has passed
/// and calls [`GameClock::tick`].
#[derive(Debug, Clone)]
pub struct GameClock {
    remaining: u32,
    state: ClockState,
}

impl GameClock {
    /// A stopped clock showing `remaining` seconds.
    pub fn new(remaining: u32) -> Self {
        Self {
            remaining,
            state: ClockState::Stopped,
        }
    }

    pub fn start(&mut self, duration_secs: u32) {
        self.remaining = duration_secs;
        self.state = ClockState::Running;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != ClockState::Running {
            return TickOutcome::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = ClockState::Stopped;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked
        }
    }

    /// Freeze the clock where it is. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = ClockState::Stopped;
        was_running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(0)
    }
}
