use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::clock::{GameClock, TickOutcome};
use crate::solutions::{Board, Puzzle, SolutionIndex, SolutionSet};

pub use crate::config::{SessionConfig, DEFAULT_BOARD_SIZE, DEFAULT_DURATION_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum StopReason {
    Manual,
    Expired,
}

/// Result of a word submission. None of these are errors; each one comes
/// with a message for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, dropped without a message.
    Ignored,
    NotRunning,
    Duplicate(String),
    Accepted(String),
    Rejected(String),
}

/// One game of word finding against a countdown.
///
/// `start` swaps in the board and its solution list together with a fresh
/// clock and an empty found list, so found words always belong to the
/// current board.
#[derive(Debug)]
pub struct GameSession {
    index: Arc<SolutionIndex>,
    config: SessionConfig,
    puzzle: Option<Arc<Puzzle>>,
    phase: Phase,
    clock: GameClock,
    found_words: Vec<String>,
    message: String,
    stop_reason: Option<StopReason>,
}

impl GameSession {
    pub fn new(index: Arc<SolutionIndex>, config: SessionConfig) -> Self {
        Self {
            index,
            config,
            puzzle: None,
            phase: Phase::Idle,
            clock: GameClock::new(config.duration_secs),
            found_words: Vec::new(),
            message: String::new(),
            stop_reason: None,
        }
    }

    /// Begin a new game from any phase.
    #[instrument(skip(self), fields(size = self.config.board_size))]
    pub fn start(&mut self) {
        self.puzzle = self.index.lookup(self.config.board_size);
        self.found_words.clear();
        self.message.clear();
        self.stop_reason = None;
        self.clock.start(self.config.duration_secs);
        self.phase = Phase::Running;

        match &self.puzzle {
            Some(puzzle) => info!(
                solutions = puzzle.solutions.len(),
                secs = self.config.duration_secs,
                "game started"
            ),
            None => info!("game started without a board"),
        }
    }

    /// Stop a running game and reveal the words that were missed.
    /// Returns false, changing nothing, when no game is running.
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.clock.stop();
        self.finish(StopReason::Manual);
        true
    }

    /// Advance the clock by one second.
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        let outcome = self.clock.tick();
        debug!(remaining = self.clock.remaining(), ?outcome, "tick");
        if outcome == TickOutcome::Expired {
            self.finish(StopReason::Expired);
        }
        outcome
    }

    #[instrument(skip(self))]
    pub fn submit_word(&mut self, raw: &str) -> SubmitOutcome {
        let word = raw.trim().to_lowercase();
        if word.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let outcome = if self.phase != Phase::Running {
            self.message = "Start a game first.".to_string();
            SubmitOutcome::NotRunning
        } else if self.found_words.contains(&word) {
            self.message = format!("You already found \"{word}\".");
            SubmitOutcome::Duplicate(word)
        } else if self.solutions().is_some_and(|s| s.contains(&word)) {
            self.message = format!("Nice! \"{word}\" is valid.");
            self.found_words.push(word.clone());
            SubmitOutcome::Accepted(word)
        } else {
            self.message = format!("\"{word}\" is not a valid solution for this board.");
            SubmitOutcome::Rejected(word)
        };

        debug!(?outcome, found = self.found_words.len(), "word submitted");
        outcome
    }

    fn finish(&mut self, reason: StopReason) {
        self.phase = Phase::Stopped;
        self.stop_reason = Some(reason);
        info!(
            %reason,
            found = self.found_count(),
            total = self.total_count(),
            remaining_secs = self.clock.remaining(),
            "game over"
        );
    }

    /// Solution words not yet found, alphabetically. Computed on demand.
    pub fn remaining_words(&self) -> Vec<&str> {
        self.solutions()
            .map(|s| s.remaining(&self.found_words).collect())
            .unwrap_or_default()
    }

    /// The missed words, once the game has been stopped.
    pub fn revealed_words(&self) -> Option<Vec<&str>> {
        (self.phase == Phase::Stopped).then(|| self.remaining_words())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn board(&self) -> Option<&Board> {
        self.puzzle.as_deref().map(|p| &p.board)
    }

    pub fn solutions(&self) -> Option<&SolutionSet> {
        self.puzzle.as_deref().map(|p| &p.solutions)
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn found_words(&self) -> &[String] {
        &self.found_words
    }

    pub fn found_count(&self) -> usize {
        self.found_words.len()
    }

    pub fn total_count(&self) -> usize {
        self.solutions().map_or(0, SolutionSet::len)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }
}
