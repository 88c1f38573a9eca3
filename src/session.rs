use log::{debug, info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::core::{
    apply_move, can_move, ChangedCell, Direction, EngineError, Grid, TileSpawn,
    DEFAULT_FOUR_PROBABILITY, DEFAULT_SIZE, INITIAL_TILES, MIN_SIZE,
};
use crate::snapshot::SessionSnapshot;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSettings {
    pub size: usize,
    /// Chance that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            size: DEFAULT_SIZE,
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }
}

impl SessionSettings {
    fn validate(&self) -> Result<(), EngineError> {
        if self.size < MIN_SIZE {
            return Err(EngineError::InvalidArgument(format!(
                "grid size {} is below the minimum of {MIN_SIZE}",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(EngineError::InvalidArgument(format!(
                "four probability {} is outside [0, 1]",
                self.four_probability
            )));
        }
        Ok(())
    }
}

/// Things a listener (speaker, logger) may react to. Drained by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    MoveCommitted { direction: Direction, score_delta: u64 },
    TileSpawned(TileSpawn),
}

/// Sole owner of the board, score and best score.
///
/// Moves and spawns are separate steps: the caller commits a move with
/// [`GameSession::attempt_move`] and, after whatever delay it wants, asks for
/// the new tile with [`GameSession::spawn_random_tile`].
pub struct GameSession {
    settings: SessionSettings,
    grid: Grid,
    score: u64,
    best_score: u64,
    game_over: bool,
    rng: StdRng,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Fresh board with two random tiles.
    pub fn new(settings: SessionSettings, rng: StdRng) -> Result<Self, EngineError> {
        settings.validate()?;
        let mut session = GameSession {
            settings,
            grid: Grid::new(settings.size),
            score: 0,
            best_score: 0,
            game_over: false,
            rng,
            events: Vec::new(),
        };
        session.seed_initial_tiles();
        Ok(session)
    }

    /// Rebuilds a session from storage. A snapshot without a board only carries
    /// its best score over to a fresh game.
    pub fn restore(
        settings: SessionSettings,
        snapshot: &SessionSnapshot,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        let Some(rows) = &snapshot.grid else {
            let mut session = GameSession::new(settings, rng)?;
            session.best_score = snapshot.best_score;
            return Ok(session);
        };

        settings.validate()?;
        let grid = Grid::from_rows(rows.clone())?;
        if grid.size() != settings.size {
            return Err(EngineError::MalformedState(format!(
                "stored grid is {0}x{0}, expected {1}x{1}",
                grid.size(),
                settings.size
            )));
        }

        let mut session = GameSession {
            settings,
            grid,
            score: snapshot.score,
            best_score: snapshot.best_score.max(snapshot.score),
            game_over: false,
            rng,
            events: Vec::new(),
        };
        session.game_over = session.is_game_over();
        info!(
            "restored {0}x{0} game, score {1}, best {2}",
            session.settings.size, session.score, session.best_score
        );
        Ok(session)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: Some(self.grid.to_rows()),
            score: self.score,
            best_score: self.best_score,
        }
    }

    /// Applies `direction` and commits the result when the board changed.
    /// Does not spawn a tile. Returns false for a rejected or no-op move.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        if self.game_over || self.is_game_over() {
            if !self.game_over {
                info!("game over with score {}", self.score);
            }
            self.game_over = true;
            return false;
        }

        let outcome = apply_move(&self.grid, direction);
        if !outcome.changed {
            debug!("move {direction} left the board unchanged");
            return false;
        }

        self.grid = outcome.grid;
        self.score += outcome.score_delta;
        self.best_score = self.best_score.max(self.score);
        debug!(
            "move {direction} committed, +{} -> score {}",
            outcome.score_delta, self.score
        );
        self.events.push(SessionEvent::MoveCommitted {
            direction,
            score_delta: outcome.score_delta,
        });
        true
    }

    /// Writes a 2 or a 4 into a random empty cell.
    ///
    /// A full board is reported as [`EngineError::NoEmptyCell`] and left as is.
    pub fn spawn_random_tile(&mut self) -> Result<TileSpawn, EngineError> {
        let spawn = self.place_random_tile()?;
        self.events.push(SessionEvent::TileSpawned(spawn));
        if self.is_game_over() {
            info!("game over with score {}", self.score);
            self.game_over = true;
        }
        Ok(spawn)
    }

    /// Probes all four directions against the committed board. Nothing is mutated.
    pub fn is_game_over(&self) -> bool {
        Direction::all().into_iter().all(|d| !can_move(&self.grid, d))
    }

    /// Empties the board, zeroes the score and seeds two tiles. Best score stays.
    pub fn reset(&mut self) {
        info!("reset after score {} (best {})", self.score, self.best_score);
        self.grid = Grid::new(self.settings.size);
        self.score = 0;
        self.game_over = false;
        self.seed_initial_tiles();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Cells that differ between `before` and the current board.
    pub fn changed_cells(&self, before: &Grid) -> Vec<ChangedCell> {
        before.changed_cells(&self.grid)
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn seed_initial_tiles(&mut self) {
        for _ in 0..INITIAL_TILES {
            if let Err(err) = self.place_random_tile() {
                warn!("could not seed initial tile: {err}");
            }
        }
    }

    fn place_random_tile(&mut self) -> Result<TileSpawn, EngineError> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return Err(EngineError::NoEmptyCell);
        }

        let (row, col) = empty[self.rng.random_range(0..empty.len())];
        let value = if self.rng.random_bool(self.settings.four_probability) {
            4
        } else {
            2
        };
        self.grid[(row, col)] = value;
        debug!("spawned {value} at ({row}, {col})");
        Ok(TileSpawn { row, col, value })
    }
}
