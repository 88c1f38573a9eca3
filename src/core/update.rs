use crate::core::transform::{rotate_clockwise, rotate_counter_clockwise, slide_rows};
use crate::core::{Direction, Grid, MoveOutcome};

/// Tries `direction` on a copy of `grid`.
///
/// Left and Right slide the rows directly. Up and Down turn the board
/// counter-clockwise so that columns become rows (top of the column at index 0),
/// slide, and turn it back.
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveOutcome {
    let (moved, score_delta) = match direction {
        Direction::Left => slide_rows(grid, true),
        Direction::Right => slide_rows(grid, false),
        Direction::Up => slide_columns(grid, true),
        Direction::Down => slide_columns(grid, false),
    };

    let changed = moved != *grid;
    MoveOutcome {
        changed,
        score_delta,
        grid: moved,
    }
}

pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    apply_move(grid, direction).changed
}

fn slide_columns(grid: &Grid, toward_top: bool) -> (Grid, u64) {
    let turned = rotate_counter_clockwise(grid);
    let (slid, score_delta) = slide_rows(&turned, toward_top);
    (rotate_clockwise(&slid), score_delta)
}
