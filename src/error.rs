use crate::types::{Color, GameResult, Position};

/// A placement that is not in the mover's current legal set.
/// The board is left untouched whenever this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid move for {color} at {position} (legal: {})", join_positions(.legal))]
pub struct InvalidMove {
    pub color: Color,
    pub position: Position,
    /// Legal placements for `color`, row-major.
    pub legal: Vec<Position>,
}

/// Errors raised by [`crate::game::GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),

    #[error("game is already over ({0})")]
    GameOver(GameResult),

    #[error("{color} cannot pass with {count} legal moves available")]
    MovesAvailable { color: Color, count: usize },
}

/// Errors raised while reading a board from its symbol form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 10 rows, found {0}")]
    RowCount(usize),

    #[error("row {row}: expected 10 cells, found {found}")]
    RowLength { row: usize, found: usize },

    #[error("unknown symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    #[error("border ring broken at ({row}, {col})")]
    OpenBorder { row: usize, col: usize },

    #[error("border cell inside the playable area at ({row}, {col})")]
    InteriorBorder { row: usize, col: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
