use crate::core::{ChangedCell, EngineError, MIN_SIZE};

/// A square board of tile values stored row-major. 0 is an empty cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        assert!(size >= MIN_SIZE, "grid side must be at least {MIN_SIZE}");
        Grid {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Builds a grid from nested rows, refusing anything that is not square.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, EngineError> {
        let size = rows.len();
        if size < MIN_SIZE {
            return Err(EngineError::MalformedState(format!(
                "grid has {size} rows, need at least {MIN_SIZE}"
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(EngineError::MalformedState(format!(
                "row {i} has {} cells, expected {size}",
                row.len()
            )));
        }
        Ok(Grid {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self[(row, col)])
    }

    pub fn set_row(&mut self, row: usize, values: &[u32]) {
        self.cells[row * self.size..(row + 1) * self.size].copy_from_slice(values);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Cells of `other` that hold a different value than `self`.
    pub fn changed_cells(&self, other: &Grid) -> Vec<ChangedCell> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, (_, &value))| ChangedCell {
                row: idx / self.size,
                col: idx % self.size,
                value,
            })
            .collect()
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = u32;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.cells[row * self.size + col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[row * self.size + col]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![vec![0, 2, 0], vec![2, 2], vec![0, 0, 0]];
        let result = Grid::from_rows(rows);
        assert!(matches!(result, Err(EngineError::MalformedState(_))));
    }

    #[test]
    fn from_rows_rejects_single_cell() {
        let result = Grid::from_rows(vec![vec![2]]);
        assert!(matches!(result, Err(EngineError::MalformedState(_))));
    }

    #[test]
    fn empty_cells_are_row_major() {
        let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
        assert_eq!(grid.empty_cells(), vec![(0, 1), (1, 0)]);
        assert!(!grid.is_full());
        assert_eq!(grid.sum(), 6);
        assert_eq!(grid.max_tile(), 4);
    }

    #[test]
    fn changed_cells_reports_new_values() {
        let before = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
        let after = Grid::from_rows(vec![vec![2, 2], vec![0, 0]]).unwrap();
        assert_eq!(
            before.changed_cells(&after),
            vec![
                ChangedCell { row: 0, col: 1, value: 2 },
                ChangedCell { row: 1, col: 1, value: 0 },
            ]
        );
    }

    #[test]
    fn get_outside_bounds_is_none() {
        let grid = Grid::new(3);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(2, 2), Some(0));
    }
}
