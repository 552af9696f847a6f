use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::warn;

/// How long the runner waits for input while no clock is armed.
pub const IDLE_POLL_MS: u64 = 250;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(GameEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(GameEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Serializes input events and clock ticks into one stream.
///
/// Ticks are only produced while the runner is armed. Deadlines advance by a
/// fixed interval from the moment of arming, so a burst of key presses does
/// not delay the next tick.
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Option<Instant>,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            next_tick: None,
        }
    }

    /// Start ticking; the first tick is one interval from now.
    pub fn arm(&mut self) {
        self.next_tick = Some(Instant::now() + self.ticker.interval());
    }

    /// Stop ticking. No tick is produced after this returns until re-armed.
    pub fn disarm(&mut self) {
        self.next_tick = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Wait for the next event or tick.
    ///
    /// Returns `None` when nothing happened within the idle poll window
    /// while disarmed, or when the event source has gone away.
    pub fn step(&mut self) -> Option<GameEvent> {
        let Some(deadline) = self.next_tick else {
            let idle = Duration::from_millis(IDLE_POLL_MS);
            return match self.event_source.recv_timeout(idle) {
                Ok(ev) => Some(ev),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    thread::sleep(idle);
                    None
                }
            };
        };

        let now = Instant::now();
        if now < deadline {
            match self.event_source.recv_timeout(deadline - now) {
                Ok(ev) => return Some(ev),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                }
            }
        }

        self.next_tick = Some(deadline + self.ticker.interval());
        Some(GameEvent::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_when_armed() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);
        runner.arm();

        match runner.step() {
            Some(GameEvent::Tick) => {}
            other => panic!("expected Tick, got {other:?}"),
        }
    }

    #[test]
    fn step_never_ticks_when_disarmed() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        assert!(!runner.is_armed());
        assert!(runner.step().is_none());

        runner.arm();
        runner.disarm();
        assert!(runner.step().is_none());
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_secs(10));
        let mut runner = Runner::new(es, ticker);
        runner.arm();

        match runner.step() {
            Some(GameEvent::Resize) => {}
            other => panic!("expected Resize event, got {other:?}"),
        }
    }

    #[test]
    fn key_traffic_does_not_delay_ticks() {
        let (tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(30));
        let mut runner = Runner::new(es, ticker);

        let started = Instant::now();
        runner.arm();
        for _ in 0..20 {
            tx.send(GameEvent::Key(KeyEvent::new(
                KeyCode::Char('a'),
                KeyModifiers::NONE,
            )))
            .unwrap();
        }

        let mut keys = 0;
        loop {
            match runner.step() {
                Some(GameEvent::Key(_)) => keys += 1,
                Some(GameEvent::Tick) => break,
                _ => {}
            }
        }

        assert_eq!(keys, 20);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn ticks_keep_coming_after_source_disconnects() {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        drop(tx);
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(2));
        let mut runner = Runner::new(es, ticker);
        runner.arm();

        for _ in 0..3 {
            assert!(matches!(runner.step(), Some(GameEvent::Tick)));
        }
    }
}
