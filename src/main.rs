// Terminal 2048.
// Controls: W/A/S/D or arrow keys (immediate response). R resets, M toggles sound, Q quits.
// Scripted use: `slide_merge move left up` applies moves to the stored game and prints it.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use slide_merge::audio::Speaker;
use slide_merge::config::Config;
use slide_merge::console_interface::{
    ConsoleInput, cleanup_terminal, handle_input, render_game, render_grid_to_string,
    setup_terminal,
};
use slide_merge::core::{Direction, UserAction};
use slide_merge::driver::GameDriver;
use slide_merge::models::GameRenderState;
use slide_merge::session::GameSession;
use slide_merge::store::JsonFileStore;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(author, version, about = "Sliding tile merge puzzle (2048) for the terminal")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Snapshot store file (overrides the config)
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// RNG seed for reproducible tile spawns
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Start with sound off
    #[arg(long)]
    mute: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive game (default)
    Play,
    /// Apply one or more moves (up, down, left, right) to the stored game and print it
    Move {
        #[arg(required = true, value_name = "DIRECTION")]
        directions: Vec<String>,
    },
    /// Print the stored game
    Show,
    /// Start a new game, keeping the best score
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.muted |= cli.mute;

    init_logging(&config)?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_interactive(&config),
        Command::Move { directions } => run_moves(&config, &directions),
        Command::Show => {
            let driver = load_driver(&config, Duration::ZERO)?;
            print_session(driver.session());
            Ok(())
        }
        Command::Reset => {
            let mut driver = load_driver(&config, Duration::ZERO)?;
            driver.reset()?;
            print_session(driver.session());
            Ok(())
        }
    }
}

fn init_logging(config: &Config) -> Result<()> {
    // stdout belongs to the terminal UI, so logs go to a file
    let log_out = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_out)))
        .init();
    Ok(())
}

fn load_driver(config: &Config, spawn_delay: Duration) -> Result<GameDriver<JsonFileStore>> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let store = JsonFileStore::new(&config.store_path);
    GameDriver::load(
        config.session_settings(),
        store,
        &config.game_key,
        spawn_delay,
        rng,
    )
    .with_context(|| format!("loading game from {}", config.store_path.display()))
}

fn print_session(session: &GameSession) {
    print!("{}", render_grid_to_string(session.grid()));
    println!("score: {}", session.score());
    println!("best: {}", session.best_score());
    println!("game over: {}", session.game_over() || session.is_game_over());
}

fn run_moves(config: &Config, directions: &[String]) -> Result<()> {
    let directions = directions
        .iter()
        .map(|d| d.parse::<Direction>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut driver = load_driver(config, Duration::ZERO)?;
    for direction in directions {
        let moved = driver.handle_move(direction, Instant::now())?;
        info!("move {direction}: {}", if moved { "committed" } else { "no change" });
    }
    driver.finish()?;
    print_session(driver.session());
    Ok(())
}

fn run_interactive(config: &Config) -> Result<()> {
    let mut driver = load_driver(config, Duration::from_millis(config.spawn_delay_ms))?;
    let mut speaker = Speaker::stdout(config.muted);
    let mut terminal = setup_terminal().map_err(|e| anyhow!(e.to_string()))?;

    let result = interactive_loop(&mut driver, &mut speaker, &mut terminal);
    let finished = driver.finish();
    cleanup_terminal().map_err(|e| anyhow!(e.to_string()))?;

    result.map_err(|e| anyhow!(e.to_string()))?;
    finished?;
    print_session(driver.session());
    Ok(())
}

fn interactive_loop(
    driver: &mut GameDriver<JsonFileStore>,
    speaker: &mut Speaker<io::Stdout>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    render_game(terminal, &render_state(driver, speaker, Vec::new(), None))?;

    loop {
        let before = driver.session().grid().clone();
        let mut error_text = None;

        match handle_input(POLL_INTERVAL) {
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::UserAction(UserAction::Move(direction))) => {
                if let Err(err) = driver.handle_move(direction, Instant::now()) {
                    error!("move failed: {err}");
                    error_text = Some(err.to_string());
                }
            }
            Ok(ConsoleInput::UserAction(UserAction::Reset)) => {
                if let Err(err) = driver.reset() {
                    error!("reset failed: {err}");
                    error_text = Some(err.to_string());
                }
            }
            Ok(ConsoleInput::UserAction(UserAction::ToggleSpeaker)) => {
                speaker.toggle();
            }
            Ok(ConsoleInput::Timeout) => match driver.tick(Instant::now()) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    error!("delayed spawn failed: {err}");
                    error_text = Some(err.to_string());
                }
            },
            Ok(ConsoleInput::Unknown) => continue,
            Err(err) => {
                error!("error reading input: {err}");
                break;
            }
        }

        let events = driver.drain_events();
        speaker.play_events(&events)?;
        let last_change = driver.session().changed_cells(&before);
        render_game(terminal, &render_state(driver, speaker, last_change, error_text))?;
    }

    Ok(())
}

fn render_state(
    driver: &GameDriver<JsonFileStore>,
    speaker: &Speaker<io::Stdout>,
    last_change: Vec<slide_merge::core::ChangedCell>,
    error: Option<String>,
) -> GameRenderState {
    let session = driver.session();
    GameRenderState {
        grid: session.grid().clone(),
        score: session.score(),
        best_score: session.best_score(),
        game_over: session.game_over() || session.is_game_over(),
        speaker_on: speaker.is_on(),
        error,
        last_change,
    }
}
