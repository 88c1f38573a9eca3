use crate::core::{ChangedCell, Grid};

pub struct GameRenderState {
    pub grid: Grid,
    pub score: u64,
    pub best_score: u64,
    pub game_over: bool,
    pub speaker_on: bool,
    pub error: Option<String>,
    pub last_change: Vec<ChangedCell>,
}
