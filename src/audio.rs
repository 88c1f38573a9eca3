use std::io::{self, Write};

use log::debug;

use crate::session::SessionEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Move,
    Popup,
}

impl Cue {
    pub fn for_event(event: &SessionEvent) -> Cue {
        match event {
            SessionEvent::MoveCommitted { .. } => Cue::Move,
            SessionEvent::TileSpawned(_) => Cue::Popup,
        }
    }
}

/// Plays session cues as terminal bells. Muting only silences output;
/// events still flow.
pub struct Speaker<W: Write> {
    enabled: bool,
    out: W,
}

impl Speaker<io::Stdout> {
    pub fn stdout(muted: bool) -> Self {
        Speaker::new(io::stdout(), muted)
    }
}

impl<W: Write> Speaker<W> {
    pub fn new(out: W, muted: bool) -> Self {
        Speaker {
            enabled: !muted,
            out,
        }
    }

    pub fn is_on(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        debug!("speaker {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    pub fn play_events(&mut self, events: &[SessionEvent]) -> io::Result<()> {
        for event in events {
            self.play(Cue::for_event(event))?;
        }
        Ok(())
    }

    pub fn play(&mut self, cue: Cue) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        // one bell for a move, two for a new tile
        let bells: &[u8] = match cue {
            Cue::Move => b"\x07",
            Cue::Popup => b"\x07\x07",
        };
        self.out.write_all(bells)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
