use std::fmt;

use once_cell::sync::Lazy;

use super::Player;
use crate::error::InvalidMove;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning line.
pub const CONNECT: usize = 4;

/// A run of four cells as `(row, col)` pairs.
pub type Window = [(usize, usize); CONNECT];

/// Every horizontal, vertical and diagonal run of four cells on the grid.
static WINDOWS: Lazy<Vec<Window>> = Lazy::new(|| {
    let mut windows = Vec::new();

    // Horizontal
    for row in 0..ROWS {
        for col in 0..=COLS - CONNECT {
            windows.push(std::array::from_fn(|i| (row, col + i)));
        }
    }

    // Vertical
    for col in 0..COLS {
        for row in 0..=ROWS - CONNECT {
            windows.push(std::array::from_fn(|i| (row + i, col)));
        }
    }

    // Diagonal (top-left to bottom-right)
    for row in 0..=ROWS - CONNECT {
        for col in 0..=COLS - CONNECT {
            windows.push(std::array::from_fn(|i| (row + i, col + i)));
        }
    }

    // Diagonal (bottom-left to top-right)
    for row in CONNECT - 1..ROWS {
        for col in 0..=COLS - CONNECT {
            windows.push(std::array::from_fn(|i| (row - i, col + i)));
        }
    }

    windows
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// Immutable grid snapshot. Every move produces a new board, so search
/// branches never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board by alternating drops, Red first.
    pub fn from_moves(columns: &[usize]) -> Result<Self, InvalidMove> {
        let mut board = Board::new();
        let mut side = Player::Red;
        for &col in columns {
            board = board.drop(col, side)?;
            side = side.other();
        }
        Ok(board)
    }

    /// All four-cell windows of the grid.
    pub fn windows() -> &'static [Window] {
        &WINDOWS
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    ///
    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLS`. Use [`Board::cell`] for a
    /// checked lookup.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Checked version of [`Board::get`]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would land on.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Legal columns in ascending order. Empty means the board is full.
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Return a new board with `side`'s piece dropped into `col`.
    pub fn drop(&self, col: usize, side: Player) -> Result<Board, InvalidMove> {
        let mut next = *self;
        next.place(col, side)?;
        Ok(next)
    }

    /// Drop into this board in place, returning the landing row.
    pub(crate) fn place(&mut self, col: usize, side: Player) -> Result<usize, InvalidMove> {
        if col >= COLS {
            return Err(InvalidMove::OutOfRange { column: col });
        }
        let row = self
            .landing_row(col)
            .ok_or(InvalidMove::ColumnFull { column: col })?;
        self.cells[row][col] = side.to_cell();
        Ok(row)
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Number of `side`'s pieces in `col` (zero for out-of-range columns)
    pub fn column_count(&self, col: usize, side: Player) -> usize {
        if col >= COLS {
            return 0;
        }
        let cell = side.to_cell();
        (0..ROWS).filter(|&row| self.cells[row][col] == cell).count()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// True if `side` owns any complete window.
    pub fn is_win(&self, side: Player) -> bool {
        let cell = side.to_cell();
        WINDOWS
            .iter()
            .any(|window| window.iter().all(|&(r, c)| self.cells[r][c] == cell))
    }

    /// No legal move left and nobody has won.
    pub fn is_draw(&self) -> bool {
        self.is_full() && !self.is_win(Player::Red) && !self.is_win(Player::Yellow)
    }

    pub fn is_terminal(&self) -> bool {
        self.is_win(Player::Red) || self.is_win(Player::Yellow) || self.is_full()
    }

    /// Check if the piece at (row, col) is part of a line of four
    pub fn wins_at(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        // (row step, col step) for horizontal, vertical, and both diagonals
        const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.run_length(row, col, dr, dc, cell)
                + self.run_length(row, col, -dr, -dc, cell);
            count >= CONNECT
        })
    }

    /// Count consecutive `cell`s from (row, col), exclusive, stepping (dr, dc)
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while r >= 0
            && r < ROWS as i32
            && c >= 0
            && c < COLS as i32
            && self.cells[r as usize][c as usize] == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
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
            write!(f, "|")?;
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => ' ',
                    Cell::Red => 'X',
                    Cell::Yellow => 'O',
                };
                write!(f, "{symbol}|")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", "-".repeat(2 * COLS + 1))?;
        let footer: Vec<String> = (0..COLS).map(|c| c.to_string()).collect();
        write!(f, " {}", footer.join(" "))
    }
}
