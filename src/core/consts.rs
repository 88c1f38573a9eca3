pub const MIN_SIZE: usize = 2;
pub const DEFAULT_SIZE: usize = 4;
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.5;
pub const INITIAL_TILES: usize = 2;
