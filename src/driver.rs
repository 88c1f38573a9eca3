use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::StdRng;

use crate::core::{Direction, EngineError};
use crate::session::{GameSession, SessionEvent, SessionSettings};
use crate::snapshot::SessionSnapshot;
use crate::store::{SnapshotStore, StoreError};

#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Runs a session the way a front end does: commit a move, wait, spawn, save.
///
/// The tile for a committed move is only placed once `spawn_delay` has passed
/// (see [`GameDriver::tick`]). Another move inside that window places it first,
/// a reset drops it.
pub struct GameDriver<S: SnapshotStore> {
    session: GameSession,
    store: S,
    key: String,
    spawn_delay: Duration,
    pending_spawn: Option<Instant>,
}

impl<S: SnapshotStore> GameDriver<S> {
    /// Continues the game stored under `key`, or starts a fresh one.
    pub fn load(
        settings: SessionSettings,
        store: S,
        key: &str,
        spawn_delay: Duration,
        rng: StdRng,
    ) -> Result<Self, DriverError> {
        let session = match store.fetch(key)? {
            Some(snapshot) => GameSession::restore(settings, &snapshot, rng)?,
            None => {
                info!("no stored game under '{key}', starting fresh");
                GameSession::new(settings, rng)?
            }
        };
        Ok(GameDriver {
            session,
            store,
            key: key.to_string(),
            spawn_delay,
            pending_spawn: None,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_pending_spawn(&self) -> bool {
        self.pending_spawn.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.session.drain_events()
    }

    /// Returns whether the move was committed.
    pub fn handle_move(&mut self, direction: Direction, now: Instant) -> Result<bool, DriverError> {
        self.flush_pending_spawn()?;

        if !self.session.attempt_move(direction) {
            return Ok(false);
        }
        if self.spawn_delay.is_zero() {
            self.spawn_and_save()?;
        } else {
            self.pending_spawn = Some(now + self.spawn_delay);
        }
        Ok(true)
    }

    /// Places the pending tile once its deadline has passed. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> Result<bool, DriverError> {
        match self.pending_spawn {
            Some(due) if now >= due => {
                self.pending_spawn = None;
                self.spawn_and_save()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Starts over. Only the best score is stored, so a later load begins a
    /// fresh game.
    pub fn reset(&mut self) -> Result<(), DriverError> {
        self.pending_spawn = None;
        self.session.reset();
        let snapshot = SessionSnapshot::best_only(self.session.best_score());
        self.store.save(&self.key, &snapshot)?;
        Ok(())
    }

    /// Places any pending tile and saves, for shutting down mid-window.
    pub fn finish(&mut self) -> Result<(), DriverError> {
        self.flush_pending_spawn()?;
        self.save()
    }

    fn flush_pending_spawn(&mut self) -> Result<(), DriverError> {
        if self.pending_spawn.take().is_some() {
            self.spawn_and_save()?;
        }
        Ok(())
    }

    fn spawn_and_save(&mut self) -> Result<(), DriverError> {
        match self.session.spawn_random_tile() {
            Ok(_) => {}
            Err(EngineError::NoEmptyCell) => warn!("board full after move, no tile spawned"),
            Err(err) => return Err(err.into()),
        }
        self.save()
    }

    fn save(&mut self) -> Result<(), DriverError> {
        self.store.save(&self.key, &self.session.snapshot())?;
        Ok(())
    }
}
