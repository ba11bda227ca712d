use log::debug;
use serde::Serialize;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::PlayError;
use crate::types::{Color, GameResult, GameState, GameSummary, Move, Position};

/// Where a session stands between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingMove(Color),
    GameOver(GameResult),
}

/// What a successful [`GameSession::play`] or [`GameSession::pass`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Turn {
    Moved {
        color: Color,
        position: Position,
        flipped: Vec<Position>,
        next: Color,
    },
    /// `color` has no legal placement while its opponent does.
    PassRequired { color: Color },
    Passed { color: Color, next: Color },
    GameOver { result: GameResult },
}

/// One game: a board plus whose turn it is.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    state: TurnState,
    config: GameConfig,
    is_pass: bool,
    flipped: Vec<Position>,
    history: Vec<Move>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::from_board(Board::new(), config.first_player, config)
    }

    /// Resumes play on an arbitrary board with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Color, config: GameConfig) -> Self {
        Self {
            board,
            state: TurnState::AwaitingMove(to_move),
            config,
            is_pass: false,
            flipped: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// `None` once the game is over.
    pub fn current_player(&self) -> Option<Color> {
        match self.state {
            TurnState::AwaitingMove(color) => Some(color),
            TurnState::GameOver(_) => None,
        }
    }

    /// Placements made so far, oldest first. Passes are not recorded.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Legal placements for the player on turn; empty after game over.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.current_player()
            .map(|color| self.board.legal_moves(color))
            .unwrap_or_default()
    }

    /// Plays `position` for the player on turn.
    ///
    /// When that player has no legal placement the position is ignored and the
    /// call reports either [`Turn::PassRequired`] or, if neither side can move,
    /// [`Turn::GameOver`]. A move that leaves neither side a legal placement
    /// ends the game immediately; the returned [`Turn::Moved`] is then the last turn.
    pub fn play(&mut self, position: Position) -> Result<Turn, PlayError> {
        let color = self.awaiting()?;

        if self.board.legal_moves(color).is_empty() {
            if self.board.legal_moves(!color).is_empty() {
                return Ok(self.finish());
            }
            debug!("{color} has no legal moves and must pass");
            if self.config.auto_pass {
                self.hand_over(color);
            }
            return Ok(Turn::PassRequired { color });
        }

        let flipped = self.board.place(color, position)?;
        debug!("{color} played {position}, flipping {}", flipped.len());

        self.history.push(Move { color, position });
        self.is_pass = false;
        self.flipped = flipped.clone();
        self.state = TurnState::AwaitingMove(!color);
        if self.board.legal_moves(!color).is_empty() && self.board.legal_moves(color).is_empty() {
            self.finish();
        }

        Ok(Turn::Moved {
            color,
            position,
            flipped,
            next: !color,
        })
    }

    /// Hands the turn to the opponent. Only allowed when the player on turn
    /// has no legal placement.
    pub fn pass(&mut self) -> Result<Turn, PlayError> {
        let color = self.awaiting()?;

        let count = self.board.legal_moves(color).len();
        if count > 0 {
            return Err(PlayError::MovesAvailable { color, count });
        }
        if self.board.legal_moves(!color).is_empty() {
            return Ok(self.finish());
        }

        self.hand_over(color);
        Ok(Turn::Passed {
            color,
            next: !color,
        })
    }

    /// Final result, once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            TurnState::GameOver(result) => Some(result),
            TurnState::AwaitingMove(_) => None,
        }
    }

    /// Piece counts and the result they currently imply.
    pub fn summary(&self) -> GameSummary {
        let score = self.board.score();
        GameSummary {
            result: score.result(),
            black_count: score.black,
            white_count: score.white,
        }
    }

    pub fn snapshot(&self) -> GameState {
        let score = self.board.score();
        GameState {
            board: self.board.rows(),
            current_player: self.current_player(),
            black_count: score.black,
            white_count: score.white,
            is_game_over: self.result().is_some(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    /// Starts a new game with the same configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    fn awaiting(&self) -> Result<Color, PlayError> {
        match self.state {
            TurnState::AwaitingMove(color) => Ok(color),
            TurnState::GameOver(result) => Err(PlayError::GameOver(result)),
        }
    }

    fn hand_over(&mut self, color: Color) {
        debug!("{color} passes");
        self.is_pass = true;
        self.flipped.clear();
        self.state = TurnState::AwaitingMove(!color);
    }

    fn finish(&mut self) -> Turn {
        let result = self.board.compute_result();
        let score = self.board.score();
        debug!(
            "game over: {result} (black {}, white {})",
            score.black, score.white
        );
        self.state = TurnState::GameOver(result);
        Turn::GameOver { result }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
