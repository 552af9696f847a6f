use std::sync::Arc;

use assert_matches::assert_matches;
use boggle::clock::TickOutcome;
use boggle::game::{GameSession, Phase, SessionConfig, StopReason, SubmitOutcome};
use boggle::solutions::SolutionIndex;
use boggle::view::{GameView, GridView};

const CAT_DOG: &str = r#"{
    "3": {
        "grid": [["C", "A", "T"], ["D", "O", "G"], ["E", "S", "R"]],
        "solutions": ["cat", "dog"]
    }
}"#;

fn session(json: &str, board_size: usize, duration_secs: u32) -> GameSession {
    let index = SolutionIndex::from_json(json).expect("test data parses");
    GameSession::new(
        Arc::new(index),
        SessionConfig {
            board_size,
            duration_secs,
        },
    )
}

#[test]
fn missing_board_size_runs_with_empty_solution_set() {
    let mut game = session(CAT_DOG, 4, 120);
    game.start();

    assert!(game.board().is_none());
    assert_eq!(
        GameView::project(&game).grid,
        GridView::Unavailable { size: 4 }
    );
    assert_matches!(game.submit_word("cat"), SubmitOutcome::Rejected(_));
    assert!(game.found_words().is_empty());
}

#[test]
fn five_ticks_expire_a_five_second_game() {
    let mut game = session(CAT_DOG, 3, 5);
    game.start();

    let outcomes: Vec<TickOutcome> = (0..6).map(|_| game.on_tick()).collect();
    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Ticked,
            TickOutcome::Ticked,
            TickOutcome::Ticked,
            TickOutcome::Ticked,
            TickOutcome::Expired,
            TickOutcome::Idle,
        ]
    );
    assert_eq!(game.phase(), Phase::Stopped);
    assert_eq!(game.seconds_remaining(), 0);
    assert_eq!(game.stop_reason(), Some(StopReason::Expired));
    assert!(game.revealed_words().is_some());
}

#[test]
fn accepted_then_duplicate_then_manual_stop() {
    let mut game = session(CAT_DOG, 3, 120);
    game.start();

    assert_eq!(
        game.submit_word("CAT "),
        SubmitOutcome::Accepted("cat".to_string())
    );
    assert_eq!(game.found_words(), ["cat".to_string()]);
    assert!(game.message().contains("valid"));

    assert_eq!(
        game.submit_word("cat"),
        SubmitOutcome::Duplicate("cat".to_string())
    );
    assert_eq!(game.found_words(), ["cat".to_string()]);
    assert!(game.message().contains("already found"));

    assert!(game.stop());
    assert_eq!(game.revealed_words(), Some(vec!["dog"]));
}

#[test]
fn submit_before_start_is_refused() {
    let mut game = session(CAT_DOG, 3, 120);

    assert_eq!(game.submit_word("cat"), SubmitOutcome::NotRunning);
    assert_eq!(game.message(), "Start a game first.");
    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.found_words().is_empty());
}

#[test]
fn found_and_remaining_partition_the_solutions() {
    let index = SolutionIndex::embedded().unwrap();
    let puzzle = index.lookup(4).unwrap();
    let mut game = GameSession::new(Arc::new(index), SessionConfig::default());
    game.start();

    let words: Vec<String> = puzzle.solutions.iter().map(str::to_string).collect();
    // submit every other word, each twice, plus some junk
    for word in words.iter().step_by(2) {
        game.submit_word(word);
        game.submit_word(&word.to_uppercase());
        game.submit_word("zzzz");
    }
    game.stop();

    let found = game.found_words().to_vec();
    let remaining = game.revealed_words().unwrap();

    let mut unique = found.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), found.len(), "no duplicates in found words");

    assert!(found.iter().all(|w| puzzle.solutions.contains(w)));
    assert!(remaining.iter().all(|w| !found.iter().any(|f| f == w)));
    assert_eq!(found.len() + remaining.len(), puzzle.solutions.len());
}

#[test]
fn running_grid_is_square_for_every_bundled_size() {
    let index = Arc::new(SolutionIndex::embedded().unwrap());
    for size in index.sizes().collect::<Vec<_>>() {
        let mut game = GameSession::new(
            index.clone(),
            SessionConfig {
                board_size: size,
                duration_secs: 60,
            },
        );
        game.start();

        match GameView::project(&game).grid {
            GridView::Shown(rows) => {
                assert_eq!(rows.len(), size);
                assert!(rows.iter().all(|r| r.len() == size));
            }
            other => panic!("size {size}: expected a grid, got {other:?}"),
        }
    }
}

#[test]
fn seconds_remaining_decreases_strictly_while_running() {
    let mut game = session(CAT_DOG, 3, 10);
    game.start();

    let mut last = game.seconds_remaining();
    while game.is_running() {
        game.on_tick();
        let now = game.seconds_remaining();
        assert_eq!(now + 1, last);
        last = now;
    }
    assert_eq!(last, 0);
}
