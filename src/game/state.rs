use super::{Board, Player};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    move_count: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            outcome: None,
            move_count: 0,
        }
    }

    /// Replay a column sequence from the initial state.
    pub fn from_moves(columns: &[usize]) -> Result<Self, MoveError> {
        columns
            .iter()
            .try_fold(GameState::initial(), |state, &col| state.apply_move(col))
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Number of pieces played so far
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.valid_moves()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mut board = self.board;
        let row = board.place(column, self.current_player)?;

        let outcome = if board.wins_at(row, column) {
            Some(GameOutcome::Winner(self.current_player))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        Ok(GameState {
            board,
            current_player: self.current_player.other(),
            outcome,
            move_count: self.move_count + 1,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
