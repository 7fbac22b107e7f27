use crate::Grid;

/// Conway's B3/S23 transition.
///
/// A live cell survives with 2 or 3 neighbors, a dead cell is born with exactly 3.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

/// Number of alive cells in the Moore neighborhood of (row, col).
///
/// Positions outside the grid are absent, edges do not wrap.
///
/// Panics if (row, col) is out of bounds.
pub fn count_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (rows, cols) = grid.size();
    assert!(row < rows && col < cols, "({row}, {col}) is out of bounds");
    let (r1, r2) = (row.saturating_sub(1), (row + 1).min(rows - 1));
    let (c1, c2) = (col.saturating_sub(1), (col + 1).min(cols - 1));

    let mut total = 0;
    for r in r1..=r2 {
        let line = grid.row(r);
        for c in c1..=c2 {
            if (r, c) != (row, col) {
                total += line[c] as u8;
            }
        }
    }
    total
}

/// Evaluate one row of the next generation into `dst` with the transition `rule`.
pub(crate) fn update_row(src: &Grid, row: usize, dst: &mut [bool], rule: impl Fn(bool, u8) -> bool) {
    debug_assert_eq!(dst.len(), src.cols());
    let cells = src.row(row);
    for (col, cell) in dst.iter_mut().enumerate() {
        *cell = rule(cells[col], count_neighbors(src, row, col));
    }
}
