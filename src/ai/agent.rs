use crate::game::GameState;

use super::profile::DifficultyProfile;
use super::search::SearchEngine;

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a column for `state.current_player()`. `None` means the agent
    /// abstains, which only happens when no column is playable.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Search-driven agent. Plays whichever side is to move.
pub struct MinimaxAgent {
    profile: DifficultyProfile,
    name: String,
}

impl MinimaxAgent {
    pub fn new(profile: DifficultyProfile) -> Self {
        MinimaxAgent {
            profile,
            name: "Minimax".to_string(),
        }
    }

    pub fn with_name(profile: DifficultyProfile, name: impl Into<String>) -> Self {
        MinimaxAgent {
            profile,
            name: name.into(),
        }
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        let mut engine = SearchEngine::new(&self.profile, state.current_player());
        let report = engine.search(state.board());
        log::debug!(
            "{} ({}) chose {:?} at depth {} after {} nodes",
            self.name,
            state.current_player().name(),
            report.best_move,
            report.completed_depth,
            report.nodes
        );
        report.best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
