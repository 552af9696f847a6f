//! What the screen shows, derived from a [`GameSession`] and nothing else.

use crate::game::{GameSession, Phase, StopReason};

/// Most missed words listed after a game; the header still reports the full count.
pub const REVEAL_CAP: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    /// No game running; the board stays hidden.
    Hidden,
    /// A game is running but the data has no board of this size.
    Unavailable { size: usize },
    Shown(Vec<Vec<char>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealView {
    pub total: usize,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub phase: Phase,
    pub grid: GridView,
    pub timer: String,
    pub status: &'static str,
    pub input_enabled: bool,
    pub message: Option<String>,
    pub found: Vec<String>,
    pub reveal: Option<RevealView>,
    /// "found n of m" once the game is over.
    pub score: Option<(usize, usize)>,
}

impl GameView {
    pub fn project(session: &GameSession) -> Self {
        let phase = session.phase();
        let running = phase == Phase::Running;

        let grid = match (running, session.board()) {
            (false, _) => GridView::Hidden,
            (true, None) => GridView::Unavailable {
                size: session.config().board_size,
            },
            (true, Some(board)) => GridView::Shown(board.rows().map(<[char]>::to_vec).collect()),
        };

        let status = match (phase, session.stop_reason()) {
            (Phase::Running, _) => "Running",
            (_, Some(StopReason::Expired)) => "Time's up",
            _ => "Stopped",
        };

        let reveal = session.revealed_words().map(|words| RevealView {
            total: words.len(),
            words: words
                .into_iter()
                .take(REVEAL_CAP)
                .map(str::to_string)
                .collect(),
        });

        let message = Some(session.message())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Self {
            phase,
            grid,
            timer: format_clock(session.seconds_remaining()),
            status,
            input_enabled: running,
            message,
            found: session.found_words().to_vec(),
            score: (phase == Phase::Stopped)
                .then(|| (session.found_count(), session.total_count())),
            reveal,
        }
    }
}

/// `mm:ss`, both fields zero-padded.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
