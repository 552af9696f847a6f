//! Bundled boards and their precomputed solution lists.
//!
//! The data file maps a board size to one grid and the words that count as
//! valid for it. Words are matched against the list for the board's *size*;
//! nothing checks that the list was computed for that exact grid, so two
//! different grids of the same size would share one list.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{EntryDefect, SolutionsError};

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

pub const SOLUTIONS_FILE: &str = "solutions.json";

/// A square grid of single-character cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<char>,
}

impl Board {
    /// Build a board from rows of cell strings, as they appear in the data file.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, EntryDefect> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (row, line) in rows.iter().enumerate() {
            if line.len() != size {
                return Err(EntryDefect::NotSquare {
                    row,
                    len: line.len(),
                    size,
                });
            }
            for (col, cell) in line.iter().enumerate() {
                let mut chars = cell.as_ref().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => cells.push(c),
                    _ => {
                        return Err(EntryDefect::BadCell {
                            row,
                            col,
                            cell: cell.as_ref().to_string(),
                        })
                    }
                }
            }
        }

        Ok(Self { size, cells })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        if row < self.size && col < self.size {
            self.cells.get(row * self.size + col).copied()
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks(0) panics; an empty board simply has no rows
        self.cells.chunks(self.size.max(1))
    }
}

/// Lower-cased words accepted for a board size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionSet {
    words: BTreeSet<String>,
}

impl SolutionSet {
    /// Normalizes each raw entry (trim, lower-case) and drops empty ones.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = raw
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Case-insensitive exact match.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Every word not present in `found`, alphabetically.
    pub fn remaining<'a>(&'a self, found: &'a [String]) -> impl Iterator<Item = &'a str> {
        self.iter()
            .filter(move |w| !found.iter().any(|f| f.as_str() == *w))
    }
}

/// One board together with the words that are valid for its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub board: Board,
    pub solutions: SolutionSet,
}

#[derive(Deserialize)]
struct RawEntry {
    grid: Vec<Vec<String>>,
    solutions: Vec<String>,
}

/// Read-only lookup from board size to puzzle, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct SolutionIndex {
    puzzles: BTreeMap<usize, Arc<Puzzle>>,
}

impl SolutionIndex {
    /// Load the data file compiled into the binary.
    pub fn embedded() -> Result<Self, SolutionsError> {
        let file = DATA_DIR
            .get_file(SOLUTIONS_FILE)
            .ok_or_else(|| SolutionsError::MissingFile {
                file: SOLUTIONS_FILE.to_string(),
            })?;
        let text = file
            .contents_utf8()
            .ok_or_else(|| SolutionsError::NotUtf8 {
                file: SOLUTIONS_FILE.to_string(),
            })?;
        Self::from_json(text)
    }

    /// Parse a document of the form `{"4": {"grid": [...], "solutions": [...]}}`.
    ///
    /// A document that is not a JSON object is an error. Individual entries
    /// that are malformed are logged and left out of the index.
    pub fn from_json(text: &str) -> Result<Self, SolutionsError> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(text)?;
        let mut puzzles = BTreeMap::new();

        for (key, value) in raw {
            match parse_entry(&key, value) {
                Ok((size, puzzle)) => {
                    debug!(
                        size,
                        solutions = puzzle.solutions.len(),
                        "loaded board"
                    );
                    puzzles.insert(size, Arc::new(puzzle));
                }
                Err(defect) => warn!(key = %key, %defect, "skipping board entry"),
            }
        }

        Ok(Self { puzzles })
    }

    pub fn lookup(&self, size: usize) -> Option<Arc<Puzzle>> {
        self.puzzles.get(&size).cloned()
    }

    /// Board sizes available, smallest first.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.puzzles.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

fn parse_entry(key: &str, value: Value) -> Result<(usize, Puzzle), EntryDefect> {
    let size = key
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| EntryDefect::BadSize {
            key: key.to_string(),
        })?;

    let entry: RawEntry = serde_json::from_value(value).map_err(|e| EntryDefect::BadShape {
        reason: e.to_string(),
    })?;

    if entry.grid.len() != size {
        return Err(EntryDefect::SizeMismatch {
            size,
            rows: entry.grid.len(),
        });
    }

    let board = Board::from_rows(&entry.grid)?;
    let solutions = SolutionSet::from_raw(&entry.solutions);

    Ok((size, Puzzle { board, solutions }))
}
