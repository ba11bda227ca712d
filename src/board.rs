use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidMove, ParseBoardError};
use crate::types::{Cell, Color, GameResult, Position, Score};

/// Edge length of the grid, border ring included.
pub const GRID_SIZE: usize = 10;
/// Number of playable cells.
pub const INTERIOR_CELLS: usize = 64;
const INTERIOR: std::ops::RangeInclusive<u8> = 1..=8;
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board: an 8x8 interior framed by a ring of border sentinels,
/// so ray walks stop on a cell value instead of a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Creates the starting board:
    /// (4,4)=white, (4,5)=black, (5,4)=black, (5,5)=white.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for i in 0..GRID_SIZE {
            cells[0][i] = Cell::Border;
            cells[GRID_SIZE - 1][i] = Cell::Border;
            cells[i][0] = Cell::Border;
            cells[i][GRID_SIZE - 1] = Cell::Border;
        }
        cells[4][4] = Cell::White;
        cells[4][5] = Cell::Black;
        cells[5][4] = Cell::Black;
        cells[5][5] = Cell::White;
        Self { cells }
    }

    /// Returns the cell at `pos`. Anything outside the grid reads as border.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .unwrap_or(Cell::Border)
    }

    /// Number of cells holding `color`.
    pub fn count_pieces(&self, color: Color) -> usize {
        self.count_cells(Cell::from(color))
    }

    /// Number of empty interior cells.
    pub fn empty_count(&self) -> usize {
        self.count_cells(Cell::Empty)
    }

    pub fn score(&self) -> Score {
        Score {
            black: self.count_pieces(Color::Black) as u8,
            white: self.count_pieces(Color::White) as u8,
        }
    }

    /// Winner by piece count on the current board.
    pub fn compute_result(&self) -> GameResult {
        self.score().result()
    }

    /// Neighbors of `pos` (Moore neighborhood) holding `opponent`.
    pub fn adjacent_opponents(&self, opponent: Color, pos: Position) -> Vec<Position> {
        let target = Cell::from(opponent);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| step(pos, dr, dc))
            .filter(|&neighbor| self.cell(neighbor) == target)
            .collect()
    }

    /// For each candidate, walks from `origin` through the candidate and
    /// returns the first `player` piece reached across an unbroken run of
    /// opponent pieces. Directions ending on an empty or border cell yield nothing.
    pub fn bracketing_ends(
        &self,
        player: Color,
        origin: Position,
        candidates: &[Position],
    ) -> Vec<Position> {
        let own = Cell::from(player);
        let opp = Cell::from(player.opponent());
        let mut ends = Vec::new();

        for &candidate in candidates {
            let Some((dr, dc)) = direction(origin, candidate) else {
                continue;
            };

            let mut cur = candidate;
            while let Some(next) = step(cur, dr, dc) {
                let cell = self.cell(next);
                if cell == own {
                    ends.push(next);
                    break;
                } else if cell != opp {
                    break;
                }
                cur = next;
            }
        }

        ends
    }

    /// Legal placements for `color`, row-major.
    pub fn legal_moves(&self, color: Color) -> Vec<Position> {
        INTERIOR
            .flat_map(|row| INTERIOR.map(move |col| Position::new(row, col)))
            .filter(|&pos| self.is_legal(color, pos))
            .collect()
    }

    pub fn is_legal(&self, color: Color, pos: Position) -> bool {
        is_interior(pos)
            && self.cell(pos) == Cell::Empty
            && !self.flank_ends(color, pos).is_empty()
    }

    /// Places `color` at `pos` and flips every bracketed opponent piece.
    /// The board is left unchanged when the move is illegal.
    pub fn apply_move(&mut self, color: Color, pos: Position) -> Result<(), InvalidMove> {
        self.place(color, pos).map(|_| ())
    }

    /// Like [`Board::apply_move`], returning the flipped positions in row-major order.
    pub fn place(&mut self, color: Color, pos: Position) -> Result<Vec<Position>, InvalidMove> {
        if !self.is_legal(color, pos) {
            log::trace!("rejected {color} move at {pos}");
            return Err(InvalidMove {
                color,
                position: pos,
                legal: self.legal_moves(color),
            });
        }

        let ends = self.flank_ends(color, pos);
        let own = Cell::from(color);
        let opp = Cell::from(color.opponent());
        self.set(pos, own);

        let mut flipped = Vec::new();
        for end in ends {
            let Some((dr, dc)) = direction(pos, end) else {
                continue;
            };

            let mut cur = pos;
            while let Some(next) = step(cur, dr, dc) {
                if next == end {
                    break;
                }
                if self.cell(next) == opp {
                    self.set(next, own);
                    flipped.push(next);
                }
                cur = next;
            }
        }

        flipped.sort_unstable();
        Ok(flipped)
    }

    /// Symbol rows, border included.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn flank_ends(&self, color: Color, pos: Position) -> Vec<Position> {
        let adjacent = self.adjacent_opponents(color.opponent(), pos);
        if adjacent.is_empty() {
            return adjacent;
        }
        self.bracketing_ends(color, pos, &adjacent)
    }

    fn count_cells(&self, target: Cell) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == target)
            .count()
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert!(is_interior(pos) && cell != Cell::Border);
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line = row
                .iter()
                .map(|cell| cell.symbol().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Reads the symbol form written by `Display`. Whitespace inside a row is
/// ignored and blank lines are skipped.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.len() != GRID_SIZE {
            return Err(ParseBoardError::RowCount(lines.len()));
        }

        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for (row, line) in lines.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != GRID_SIZE {
                return Err(ParseBoardError::RowLength {
                    row,
                    found: symbols.len(),
                });
            }

            for (col, &symbol) in symbols.iter().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(ParseBoardError::UnknownSymbol { row, col, symbol })?;
                let on_ring = row == 0 || col == 0 || row == GRID_SIZE - 1 || col == GRID_SIZE - 1;
                match (on_ring, cell == Cell::Border) {
                    (true, false) => return Err(ParseBoardError::OpenBorder { row, col }),
                    (false, true) => return Err(ParseBoardError::InteriorBorder { row, col }),
                    _ => cells[row][col] = cell,
                }
            }
        }

        Ok(Self { cells })
    }
}

fn is_interior(pos: Position) -> bool {
    INTERIOR.contains(&pos.row) && INTERIOR.contains(&pos.col)
}

/// Moves one cell; `None` when that would leave the grid.
fn step(pos: Position, dr: i8, dc: i8) -> Option<Position> {
    let row = pos.row.checked_add_signed(dr)?;
    let col = pos.col.checked_add_signed(dc)?;
    ((row as usize) < GRID_SIZE && (col as usize) < GRID_SIZE).then_some(Position::new(row, col))
}

/// Unit step from `from` toward `to`. `None` when both are the same cell.
fn direction(from: Position, to: Position) -> Option<(i8, i8)> {
    let dr = (to.row as i16 - from.row as i16).signum() as i8;
    let dc = (to.col as i16 - from.col as i16).signum() as i8;
    (dr != 0 || dc != 0).then_some((dr, dc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    const MIXED_RAYS: &str = "
        * * * * * * * * * *
        * . . . . . . . . *
        * . . . X . . . . *
        * . . . O O . . . *
        * X O O . X . . . *
        * . . . O O . . . *
        * . . . O . X . . *
        * . . . O . . . . *
        * . . . O . . . . *
        * * * * * * * * * *
    ";

    #[test]
    fn starting_board_layout() {
        let board = Board::new();

        assert_eq!(board.count_pieces(Color::Black), 2);
        assert_eq!(board.count_pieces(Color::White), 2);
        assert_eq!(board.empty_count(), 60);
        assert_eq!(board.cell(pos(4, 4)), Cell::White);
        assert_eq!(board.cell(pos(4, 5)), Cell::Black);
        assert_eq!(board.cell(pos(5, 4)), Cell::Black);
        assert_eq!(board.cell(pos(5, 5)), Cell::White);

        for i in 0..GRID_SIZE as u8 {
            for ring in [pos(0, i), pos(9, i), pos(i, 0), pos(i, 9)] {
                assert_eq!(board.cell(ring), Cell::Border);
            }
        }
    }

    #[test]
    fn initial_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        assert_eq!(
            board.legal_moves(Color::Black),
            vec![pos(3, 4), pos(4, 3), pos(5, 6), pos(6, 5)]
        );
        assert_eq!(
            board.legal_moves(Color::White),
            vec![pos(3, 5), pos(4, 6), pos(5, 3), pos(6, 4)]
        );
    }

    #[test]
    fn legal_moves_are_stable_without_mutation() {
        let board: Board = MIXED_RAYS.parse().unwrap();

        let first = board.legal_moves(Color::White);
        assert_eq!(first, board.legal_moves(Color::White));
        for mv in first {
            assert_eq!(board.cell(mv), Cell::Empty);
            assert!(is_interior(mv));
        }
    }

    #[test]
    fn adjacent_opponents_ignores_own_and_empty_neighbors() {
        let board = Board::new();

        assert_eq!(board.adjacent_opponents(Color::White, pos(4, 3)), vec![pos(4, 4)]);
        assert_eq!(
            board.adjacent_opponents(Color::Black, pos(4, 6)),
            vec![pos(4, 5)]
        );
        assert!(board.adjacent_opponents(Color::White, pos(1, 1)).is_empty());
    }

    #[test]
    fn adjacent_opponents_on_border_cell_never_leaves_grid() {
        let board = Board::new();

        assert!(board.adjacent_opponents(Color::White, pos(0, 0)).is_empty());
        assert!(board.adjacent_opponents(Color::Black, pos(9, 9)).is_empty());
    }

    #[test]
    fn bracketing_ends_one_per_closed_direction() {
        let board: Board = MIXED_RAYS.parse().unwrap();
        let origin = pos(4, 4);

        let adjacent = board.adjacent_opponents(Color::White, origin);
        assert_eq!(
            adjacent,
            vec![pos(3, 4), pos(3, 5), pos(4, 3), pos(5, 4), pos(5, 5)]
        );
        assert_eq!(
            board.bracketing_ends(Color::Black, origin, &adjacent),
            vec![pos(2, 4), pos(4, 1), pos(6, 6)]
        );
    }

    #[test]
    fn bracketing_ends_skips_degenerate_candidate() {
        let board = Board::new();

        assert!(board.bracketing_ends(Color::Black, pos(4, 3), &[pos(4, 3)]).is_empty());
    }

    #[test]
    fn place_flips_opponent_stones_and_updates_counts() {
        let mut board = Board::new();

        let flipped = board.place(Color::Black, pos(4, 3)).unwrap();

        assert_eq!(flipped, vec![pos(4, 4)]);
        assert_eq!(board.count_pieces(Color::Black), 4);
        assert_eq!(board.count_pieces(Color::White), 1);
        assert_eq!(board.empty_count(), 59);
        assert_eq!(board.cell(pos(4, 3)), Cell::Black);
        assert_eq!(board.cell(pos(5, 5)), Cell::White);
    }

    #[test]
    fn place_flips_only_bracketed_directions() {
        let mut board: Board = MIXED_RAYS.parse().unwrap();
        let before = board;

        let flipped = board.place(Color::Black, pos(4, 4)).unwrap();

        assert_eq!(flipped, vec![pos(3, 4), pos(4, 2), pos(4, 3), pos(5, 5)]);
        assert_eq!(board.cell(pos(4, 4)), Cell::Black);
        for &mv in &flipped {
            assert_eq!(before.cell(mv), Cell::White);
            assert_eq!(board.cell(mv), Cell::Black);
        }
        for row in 0..GRID_SIZE as u8 {
            for col in 0..GRID_SIZE as u8 {
                let cur = pos(row, col);
                if cur != pos(4, 4) && !flipped.contains(&cur) {
                    assert_eq!(board.cell(cur), before.cell(cur), "cell {cur} changed");
                }
            }
        }
        assert_eq!(before.count_pieces(Color::Black), 4);
        assert_eq!(board.count_pieces(Color::Black), 9);
        assert_eq!(board.count_pieces(Color::White), 5);
    }

    #[test]
    fn illegal_place_returns_error_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        for target in [pos(4, 4), pos(0, 0), pos(20, 3), pos(1, 1)] {
            let err = board.apply_move(Color::Black, target).unwrap_err();
            assert_eq!(err.position, target);
            assert_eq!(err.legal, before.legal_moves(Color::Black));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn full_board_tie_has_no_moves() {
        let mut text = String::from("* * * * * * * * * *\n");
        for row in 1..=8 {
            let symbol = if row <= 4 { "X" } else { "O" };
            text.push_str(&format!("* {} *\n", [symbol; 8].join(" ")));
        }
        text.push_str("* * * * * * * * * *\n");
        let board: Board = text.parse().unwrap();

        assert_eq!(board.score(), Score { black: 32, white: 32 });
        assert_eq!(board.compute_result(), GameResult::Tie);
        assert!(board.legal_moves(Color::Black).is_empty());
        assert!(board.legal_moves(Color::White).is_empty());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let board = Board::new();
        let text = board.to_string();

        assert_eq!(text.lines().next(), Some("* * * * * * * * * *"));
        assert_eq!(text.lines().nth(4), Some("* . . . O X . . . *"));
        assert_eq!(text.parse::<Board>(), Ok(board));
        assert_eq!(board.rows()[5], "*...XO...*");
    }

    #[test]
    fn parse_rejects_malformed_boards() {
        let rows: Vec<String> = Board::new().rows();

        assert_eq!(
            rows[..9].join("\n").parse::<Board>(),
            Err(ParseBoardError::RowCount(9))
        );

        let mut short = rows.clone();
        short[3].pop();
        assert_eq!(
            short.join("\n").parse::<Board>(),
            Err(ParseBoardError::RowLength { row: 3, found: 9 })
        );

        let mut unknown = rows.clone();
        unknown[2] = "*..#.....*".to_string();
        assert_eq!(
            unknown.join("\n").parse::<Board>(),
            Err(ParseBoardError::UnknownSymbol {
                row: 2,
                col: 3,
                symbol: '#'
            })
        );

        let mut open = rows.clone();
        open[6] = ".........*".to_string();
        assert_eq!(
            open.join("\n").parse::<Board>(),
            Err(ParseBoardError::OpenBorder { row: 6, col: 0 })
        );

        let mut walled = rows;
        walled[1] = "*.*......*".to_string();
        assert_eq!(
            walled.join("\n").parse::<Board>(),
            Err(ParseBoardError::InteriorBorder { row: 1, col: 2 })
        );
    }
}
