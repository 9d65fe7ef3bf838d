use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use connect_four_ai::ai::{Agent, Difficulty, MinimaxAgent, RandomAgent, SearchEngine};
use connect_four_ai::arena::{first_agent_colour, play_game, ArenaOptions};
use connect_four_ai::config::AppConfig;
use connect_four_ai::game::{GameOutcome, GameState, Player};

/// Connect Four engine: headless matches and move analysis.
#[derive(Parser)]
#[command(name = "connect-four-ai", version, about)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "connect4.toml")]
    config: PathBuf,

    /// Log search details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play engine-vs-engine games without a UI
    Match {
        /// Red's player in odd-numbered games: easy, medium, hard or random
        #[arg(long, default_value = "medium")]
        red: String,

        /// Yellow's player in odd-numbered games; colours swap every game
        #[arg(long, default_value = "hard")]
        yellow: String,

        /// Override the number of games
        #[arg(long)]
        games: Option<usize>,

        /// Override the opening seed
        #[arg(long)]
        seed: Option<u64>,

        /// Force a random first move
        #[arg(long)]
        random_opening: bool,
    },

    /// Print the engine's move for the side to play after a move list
    BestMove {
        /// Comma-separated columns played so far, Red first (e.g. 3,3,4)
        #[arg(long, value_delimiter = ',')]
        moves: Vec<usize>,

        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Emit the search report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Match {
            red,
            yellow,
            games,
            seed,
            random_opening,
        } => run_match(&config, &red, &yellow, games, seed, random_opening),
        Command::BestMove {
            moves,
            difficulty,
            json,
        } => best_move(&config, &moves, difficulty, json),
    }
}

fn build_agent(config: &AppConfig, spec: &str, seed: Option<u64>) -> Result<Box<dyn Agent>> {
    if spec.eq_ignore_ascii_case("random") {
        let agent = match seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        };
        return Ok(Box::new(agent));
    }
    let difficulty: Difficulty = spec
        .parse()
        .with_context(|| format!("invalid player '{spec}'"))?;
    let profile = config.profile(difficulty).clone();
    Ok(Box::new(MinimaxAgent::with_name(profile, format!("Minimax ({difficulty})"))))
}

fn run_match(
    config: &AppConfig,
    red: &str,
    yellow: &str,
    games: Option<usize>,
    seed: Option<u64>,
    random_opening: bool,
) -> Result<()> {
    let games = games.unwrap_or(config.arena.games);
    if games == 0 {
        bail!("--games must be >= 1");
    }
    let seed = seed.or(config.arena.seed);

    for game in 1..=games {
        let game_seed = seed.map(|s| s.wrapping_add(game as u64));
        let (red_spec, yellow_spec) = match first_agent_colour(game) {
            Player::Red => (red, yellow),
            Player::Yellow => (yellow, red),
        };
        let mut red_agent = build_agent(config, red_spec, game_seed)?;
        let mut yellow_agent = build_agent(config, yellow_spec, game_seed.map(|s| !s))?;
        let options = ArenaOptions {
            random_opening: random_opening || config.arena.random_opening,
            seed: game_seed,
        };

        let record = play_game(red_agent.as_mut(), yellow_agent.as_mut(), &options)
            .with_context(|| format!("game {game} aborted"))?;

        let result = match record.outcome {
            GameOutcome::Winner(p) => format!("{} wins", p.name()),
            GameOutcome::Draw => "draw".to_string(),
        };
        info!(
            "game {game}/{games}: {} (Red) vs {} (Yellow): {result} in {} moves, think time {:.2}s / {:.2}s",
            red_agent.name(),
            yellow_agent.name(),
            record.columns.len(),
            record.red.think_time.as_secs_f64(),
            record.yellow.think_time.as_secs_f64(),
        );
        println!("{}\n", record.final_state.board());
    }

    Ok(())
}

fn best_move(config: &AppConfig, moves: &[usize], difficulty: Difficulty, json: bool) -> Result<()> {
    let state = GameState::from_moves(moves).context("replaying --moves")?;
    if state.is_terminal() {
        println!("{}\n\nnone (game is over)", state.board());
        return Ok(());
    }
    let profile = config.profile(difficulty);
    let mut engine = SearchEngine::new(profile, state.current_player());
    let report = engine.search(state.board());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}\n", state.board());
    match report.best_move {
        Some(col) => println!(
            "{} plays column {col} (score {}, depth {}, {} nodes, {:.3}s)",
            state.current_player().name(),
            report.score.unwrap_or_default(),
            report.completed_depth,
            report.nodes,
            report.elapsed.as_secs_f64()
        ),
        None => println!("none"),
    }
    Ok(())
}
