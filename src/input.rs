//! Turns raw input (browser-style key codes, swipe gestures) into a [`Direction`].

use crate::core::{Direction, EngineError};

/// Swipes shorter than this on both axes are taps, not moves.
pub const SWIPE_DEAD_ZONE: f64 = 2.0;

/// Maps the classic arrow key codes (37 left, 38 up, 39 right, 40 down).
pub fn direction_from_key_code(code: u32) -> Result<Direction, EngineError> {
    match code {
        37 => Ok(Direction::Left),
        38 => Ok(Direction::Up),
        39 => Ok(Direction::Right),
        40 => Ok(Direction::Down),
        other => Err(EngineError::InvalidArgument(format!(
            "key code {other} is not an arrow key"
        ))),
    }
}

/// Classifies a swipe from `start` to `end` in screen coordinates (y grows downward)
/// into one of four 90 degree sectors. Returns `None` inside the dead zone.
pub fn swipe_direction(start: (f64, f64), end: (f64, f64)) -> Option<Direction> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    if dx.abs() < SWIPE_DEAD_ZONE && dy.abs() < SWIPE_DEAD_ZONE {
        return None;
    }

    let angle = dy.atan2(dx).to_degrees();
    let direction = if (-135.0..=-45.0).contains(&angle) {
        Direction::Up
    } else if angle > 45.0 && angle < 135.0 {
        Direction::Down
    } else if (-45.0..=45.0).contains(&angle) {
        Direction::Right
    } else {
        Direction::Left
    };
    Some(direction)
}
