use crate::core::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAction {
    Move(Direction),
    Reset,
    ToggleSpeaker,
}

/// Result of trying one direction against a grid. The input grid is never touched;
/// when `changed` is false `grid` equals the input and `score_delta` is 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub changed: bool,
    pub score_delta: u64,
    pub grid: Grid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSpawn {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// A cell whose value differs between two grids, holding the newer value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChangedCell {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}
