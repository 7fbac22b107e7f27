use crate::{LifeError, Result};
use rand::Rng;

/// Rectangular field of binary cells stored row-major.
///
/// Dimensions are fixed at construction. Rows are contiguous in memory,
/// so a band of whole rows is a contiguous slice of `cells`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<bool>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn blank(rows: usize, cols: usize) -> Result<Self> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            cells: vec![false; rows * cols],
            rows,
            cols,
        })
    }

    /// Create a grid where every cell is alive with probability 0.5.
    pub fn random(rows: usize, cols: usize, rng: &mut impl Rng) -> Result<Self> {
        check_dimensions(rows, cols)?;
        let cells = (0..rows * cols).map(|_| rng.gen_bool(0.5)).collect();
        Ok(Self { cells, rows, cols })
    }

    /// Build a grid from nested rows of `0`/`1` values.
    ///
    /// Fails on empty input, ragged rows or any value other than 0 and 1.
    pub fn from_rows(values: Vec<Vec<u8>>) -> Result<Self> {
        let rows = values.len();
        let cols = values.first().map_or(0, Vec::len);
        check_dimensions(rows, cols)?;

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in values.into_iter().enumerate() {
            if line.len() != cols {
                return Err(LifeError::validation(format!(
                    "row {row} has {} cells, expected {cols}",
                    line.len()
                )));
            }
            for (col, value) in line.into_iter().enumerate() {
                cells.push(cell_from_value(value).ok_or_else(|| {
                    LifeError::validation(format!(
                        "cell ({row}, {col}) is {value}, expected 0 or 1"
                    ))
                })?);
            }
        }
        Ok(Self { cells, rows, cols })
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { cells, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get cell state at (row, col).
    ///
    /// Panics if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) is out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Set cell state at (row, col).
    ///
    /// Panics if the position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) is out of bounds");
        self.cells[row * self.cols + col] = alive;
    }

    /// Cells of a single row.
    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Total number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True if no cell is alive.
    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Cells as nested rows of `0`/`1`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks_exact(self.cols)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        for row in self.cells.chunks_exact(self.cols) {
            let line = row
                .iter()
                .map(|&c| if c { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(LifeError::validation(format!(
            "grid dimensions must be positive, got {rows}x{cols}"
        )));
    }
    rows.checked_mul(cols)
        .map(|_| ())
        .ok_or_else(|| LifeError::validation(format!("grid {rows}x{cols} is too large")))
}

pub(crate) fn cell_from_value(value: u8) -> Option<bool> {
    match value {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}
