//! Headless game runner: pits two agents against each other from the initial
//! position and records what happened.

mod game;

pub use game::{first_agent_colour, play_game, ArenaOptions, GameRecord, SideRecord};
