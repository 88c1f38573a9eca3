mod consts;
mod errors;
mod grid;
mod model_helpers;
mod models;
mod transform;
mod update;

pub use consts::*;
pub use errors::EngineError;
pub use grid::Grid;
pub use models::{ChangedCell, Direction, MoveOutcome, TileSpawn, UserAction};
pub use transform::{
    compact_line, merge_line, rotate_clockwise, rotate_counter_clockwise, slide_line, slide_rows,
};
pub use update::{apply_move, can_move};
