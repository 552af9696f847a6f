//! Errors raised while loading the bundled puzzle data.
//!
//! Everything that can go wrong once a game is running is reported to the
//! player as a message instead; see [`crate::game::SubmitOutcome`].

use derive_more::{Display, Error, From};

/// Fatal problems with the puzzle data, surfaced before the terminal is set up.
#[derive(Debug, Display, Error, From)]
pub enum SolutionsError {
    /// The data file is not part of the embedded data directory.
    #[display("solutions file {file} not found")]
    MissingFile { file: String },
    /// The data file exists but is not UTF-8 text.
    #[display("solutions file {file} is not valid UTF-8")]
    NotUtf8 { file: String },
    /// The document is not a JSON object keyed by board size.
    #[display("malformed solutions data: {_0}")]
    #[from]
    Parse(serde_json::Error),
}

/// Why a single entry of the data file was dropped from the index.
///
/// Defective entries are logged and skipped; asking for that size then
/// yields no board, same as a size that was never listed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EntryDefect {
    #[display("key {key:?} is not a positive board size")]
    BadSize { key: String },
    #[display("entry does not have the grid/solutions shape: {reason}")]
    BadShape { reason: String },
    #[display("grid has {rows} rows but is keyed as size {size}")]
    SizeMismatch { size: usize, rows: usize },
    #[display("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[display("cell {cell:?} at row {row}, column {col} is not a single character")]
    BadCell { row: usize, col: usize, cell: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_converts_and_displays() {
        let err: SolutionsError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("malformed solutions data"));
    }

    #[test]
    fn defect_messages_name_the_problem() {
        let defect = EntryDefect::BadCell {
            row: 1,
            col: 2,
            cell: "Qu".to_string(),
        };
        assert_eq!(
            defect.to_string(),
            "cell \"Qu\" at row 1, column 2 is not a single character"
        );
    }
}
