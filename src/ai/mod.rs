//! Move selection: profiles, the evaluator, move ordering, the alpha-beta
//! engine with its iterative-deepening driver, and the agents built on them.

mod agent;
pub mod driver;
pub mod evaluator;
pub mod ordering;
pub mod profile;
mod random;
pub mod search;

pub use agent::{Agent, MinimaxAgent};
pub use driver::{select_move, SearchReport, AI_PLAYER};
pub use evaluator::{score, window_score};
pub use profile::{Difficulty, DifficultyProfile, HeuristicWeights, MAX_SEARCH_DEPTH};
pub use random::RandomAgent;
pub use search::{exhaustive_minimax, SearchEngine, WIN_SCORE};
