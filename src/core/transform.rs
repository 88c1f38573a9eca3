use std::iter::repeat_n;

use crate::core::Grid;

/// Cell (i, j) lands on (j, n - 1 - i).
pub fn rotate_clockwise(grid: &Grid) -> Grid {
    let n = grid.size();
    let mut rotated = Grid::new(n);
    for i in 0..n {
        for j in 0..n {
            rotated[(j, n - 1 - i)] = grid[(i, j)];
        }
    }
    rotated
}

/// Cell (i, j) lands on (n - 1 - j, i). Inverse of [`rotate_clockwise`].
pub fn rotate_counter_clockwise(grid: &Grid) -> Grid {
    let n = grid.size();
    let mut rotated = Grid::new(n);
    for i in 0..n {
        for j in 0..n {
            rotated[(n - 1 - j, i)] = grid[(i, j)];
        }
    }
    rotated
}

/// Slides every tile to one end of the line, keeping their order.
pub fn compact_line(line: &[u32], toward_low: bool) -> Vec<u32> {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let gap = line.len() - tiles.len();
    if toward_low {
        tiles.into_iter().chain(repeat_n(0, gap)).collect()
    } else {
        repeat_n(0, gap).chain(tiles).collect()
    }
}

/// Combines adjacent equal tiles, scanning from the target end inward.
///
/// The sum stays in the cell nearer the target end and its partner is cleared.
/// A freshly combined cell is never combined again in the same pass, so
/// `2 2 2 0` toward low gives `4 0 2 0`. A pair whose sum does not fit in a
/// cell is left as it is. Returns the new line and the sum of every combined
/// value.
pub fn merge_line(line: &[u32], toward_low: bool) -> (Vec<u32>, u64) {
    let mut merged = line.to_vec();
    let len = merged.len();
    let position = |k: usize| if toward_low { k } else { len - 1 - k };

    let mut score_delta = 0u64;
    let mut k = 0;
    while k + 1 < len {
        let (near, far) = (position(k), position(k + 1));
        let combined = match (merged[near], merged[far]) {
            (0, _) => None,
            (a, b) if a == b => a.checked_add(b),
            _ => None,
        };
        match combined {
            Some(sum) => {
                merged[near] = sum;
                merged[far] = 0;
                score_delta += sum as u64;
                k += 2;
            }
            None => k += 1,
        }
    }
    (merged, score_delta)
}

/// compact, merge, compact again to close the holes merging leaves behind.
pub fn slide_line(line: &[u32], toward_low: bool) -> (Vec<u32>, u64) {
    let compacted = compact_line(line, toward_low);
    let (merged, score_delta) = merge_line(&compacted, toward_low);
    (compact_line(&merged, toward_low), score_delta)
}

pub fn slide_rows(grid: &Grid, toward_low: bool) -> (Grid, u64) {
    let mut slid = grid.clone();
    let mut score_delta = 0;
    for (i, row) in grid.rows().enumerate() {
        let (line, delta) = slide_line(row, toward_low);
        slid.set_row(i, &line);
        score_delta += delta;
    }
    (slid, score_delta)
}
