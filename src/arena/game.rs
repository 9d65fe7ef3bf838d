use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use crate::ai::driver::serialize_secs;
use crate::ai::{Agent, RandomAgent};
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Player};

/// How a single game is started.
#[derive(Debug, Clone, Default)]
pub struct ArenaOptions {
    /// Play the very first move uniformly at random instead of asking Red's agent.
    pub random_opening: bool,
    /// Seed for the opening move; `None` draws from the OS.
    pub seed: Option<u64>,
}

/// Per-side bookkeeping for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideRecord {
    pub moves: usize,
    #[serde(serialize_with = "serialize_secs")]
    pub think_time: Duration,
}

/// Result of playing one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    /// Columns in play order, Red first.
    pub columns: Vec<usize>,
    pub red: SideRecord,
    pub yellow: SideRecord,
    #[serde(skip)]
    pub final_state: GameState,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(p) => Some(p),
            GameOutcome::Draw => None,
        }
    }
}

/// Colour taken by the first-named agent in game `game` (1-based) of a series.
/// Colours alternate so both agents open equally often.
pub fn first_agent_colour(game: usize) -> Player {
    if game % 2 == 1 {
        Player::Red
    } else {
        Player::Yellow
    }
}

/// Play one game to completion. Red moves first.
pub fn play_game(
    red: &mut dyn Agent,
    yellow: &mut dyn Agent,
    options: &ArenaOptions,
) -> Result<GameRecord, MoveError> {
    let mut state = GameState::initial();
    let mut columns = Vec::new();
    let mut red_record = SideRecord::default();
    let mut yellow_record = SideRecord::default();

    let mut opener = options.random_opening.then(|| match options.seed {
        Some(seed) => RandomAgent::with_seed(seed),
        None => RandomAgent::new(),
    });

    while !state.is_terminal() {
        let player = state.current_player();
        let started = Instant::now();
        let action = match (opener.take(), player) {
            (Some(mut random), _) => random.select_action(&state),
            (None, Player::Red) => red.select_action(&state),
            (None, Player::Yellow) => yellow.select_action(&state),
        };
        let elapsed = started.elapsed();

        let column = action.ok_or(MoveError::NoMove { player })?;
        state = state.apply_move(column)?;
        columns.push(column);

        let record = match player {
            Player::Red => &mut red_record,
            Player::Yellow => &mut yellow_record,
        };
        record.moves += 1;
        record.think_time += elapsed;
        debug!(
            "move {}: {} -> column {column} ({:.3}s)",
            state.move_count(),
            player.name(),
            elapsed.as_secs_f64()
        );
    }

    let outcome = state
        .outcome()
        .expect("loop exits only on a terminal state");

    Ok(GameRecord {
        outcome,
        columns,
        red: red_record,
        yellow: yellow_record,
        final_state: state,
    })
}
