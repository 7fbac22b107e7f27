mod parallel;

use crate::rules::{self, next_state};
use crate::{get_config, Grid, LifeError, Result};
use rand::Rng;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// How [`GridEngine::advance`] distributes the per-cell work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Row-major loop on the calling thread.
    Sequential,
    /// Disjoint bands of whole rows, one scoped thread per band.
    Parallel { workers: NonZeroUsize },
}

impl Schedule {
    pub fn parallel(workers: usize) -> Result<Self> {
        NonZeroUsize::new(workers)
            .map(|workers| Self::Parallel { workers })
            .ok_or_else(|| LifeError::validation("worker count must be positive"))
    }
}

impl Default for Schedule {
    /// Parallel, with the worker count from [`get_config`].
    fn default() -> Self {
        Self::Parallel {
            workers: get_config().default_workers,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Safe to read or to start an advance.
    Idle,
    /// An advance is running. Only observable from inside the engine,
    /// `advance` holds `&mut self` for its whole duration.
    Advancing,
    /// An advance failed or was cancelled; the grid is undefined.
    Poisoned,
}

/// Game of Life on a bounded `rows x cols` grid.
///
/// Holds the current generation and a scratch grid for the next one.
/// Every advance reads only `curr`, writes only `next`, then swaps them.
///
/// # Example
///
/// ```rust
/// use gol_engines::{Grid, GridEngine};
///
/// let blinker = Grid::from_rows(vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]).unwrap();
/// let mut engine = GridEngine::new(3, 3, Some(blinker)).unwrap();
/// engine.advance().unwrap();
/// assert_eq!(engine.render(), "[0, 1, 0]\n[0, 1, 0]\n[0, 1, 0]\n");
/// ```
pub struct GridEngine {
    curr: Grid,
    next: Grid,
    schedule: Schedule,
    state: EngineState,
    generation: u64,
}

impl GridEngine {
    /// Create an engine from `seed`, or from random cells if `seed` is `None`.
    ///
    /// The seed must be exactly `rows x cols`.
    pub fn new(rows: usize, cols: usize, seed: Option<Grid>) -> Result<Self> {
        match seed {
            Some(grid) => {
                if grid.size() != (rows, cols) {
                    return Err(LifeError::validation(format!(
                        "seed is {}x{}, expected {rows}x{cols}",
                        grid.rows(),
                        grid.cols()
                    )));
                }
                Ok(Self::from_grid(grid))
            }
            None => Self::random(rows, cols, None),
        }
    }

    /// Create a field with random cells.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> Result<Self> {
        use rand::SeedableRng;
        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_entropy()
        };
        Self::random_with(rows, cols, &mut rng)
    }

    /// Create a field with random cells drawn from `rng`.
    pub fn random_with(rows: usize, cols: usize, rng: &mut impl Rng) -> Result<Self> {
        Ok(Self::from_grid(Grid::random(rows, cols, rng)?))
    }

    /// Create an engine whose dimensions are taken from `grid`.
    pub fn from_grid(grid: Grid) -> Self {
        let (rows, cols) = grid.size();
        Self {
            next: Grid::from_cells(rows, cols, vec![false; rows * cols]),
            curr: grid,
            schedule: Schedule::default(),
            state: EngineState::Idle,
            generation: 0,
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of completed advances.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rows(&self) -> usize {
        self.curr.rows()
    }

    pub fn cols(&self) -> usize {
        self.curr.cols()
    }

    /// Read-only view of the current generation.
    pub fn snapshot(&self) -> &Grid {
        &self.curr
    }

    /// Current generation, one `[1, 0, 1]` line per row.
    pub fn render(&self) -> String {
        self.curr.to_string()
    }

    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.curr.get(row, col)
    }

    pub fn population(&self) -> usize {
        self.curr.population()
    }

    /// Alive cells around (row, col) in the current generation, in `0..=8`.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        rules::count_neighbors(&self.curr, row, col)
    }

    /// Apply the transition to (row, col) and store the result in the next generation.
    pub fn evaluate_cell(&mut self, row: usize, col: usize, neighbors: u8) {
        let alive = next_state(self.curr.get(row, col), neighbors);
        self.next.set(row, col, alive);
    }

    /// Compute the next generation and make it current.
    ///
    /// On error the engine is poisoned and every later call fails with
    /// [`LifeError::EnginePoisoned`].
    pub fn advance(&mut self) -> Result<()> {
        self.advance_inner(None)
    }

    /// Like [`advance`](Self::advance), but gives up with [`LifeError::Cancelled`]
    /// once `deadline` has passed. Workers check the deadline between rows.
    pub fn advance_with_deadline(&mut self, deadline: Instant) -> Result<()> {
        self.advance_inner(Some(deadline))
    }

    /// Advance `generations` times, stopping at the first error.
    pub fn advance_by(&mut self, generations: u64) -> Result<()> {
        for _ in 0..generations {
            self.advance()?;
        }
        Ok(())
    }

    fn advance_inner(&mut self, deadline: Option<Instant>) -> Result<()> {
        self.advance_with_rule(deadline, next_state)
    }

    fn advance_with_rule<R>(&mut self, deadline: Option<Instant>, rule: R) -> Result<()>
    where
        R: Fn(bool, u8) -> bool + Sync,
    {
        if self.state == EngineState::Poisoned {
            return Err(LifeError::EnginePoisoned);
        }
        self.state = EngineState::Advancing;

        let result = match self.schedule {
            Schedule::Sequential => {
                panic::catch_unwind(AssertUnwindSafe(|| self.evaluate_sequential(deadline, &rule)))
                    .unwrap_or_else(|payload| {
                        Err(LifeError::WorkerFailed(parallel::panic_message(&*payload)))
                    })
            }
            Schedule::Parallel { workers } => {
                let src = &self.curr;
                parallel::for_each_band(
                    self.next.cells_mut(),
                    src.cols(),
                    workers,
                    |first_row, band| evaluate_band(src, first_row, band, deadline, &rule),
                )
            }
        };
        if let Err(e) = result {
            self.state = EngineState::Poisoned;
            return Err(e);
        }

        std::mem::swap(&mut self.curr, &mut self.next);
        self.next.clear();
        self.generation += 1;
        self.state = EngineState::Idle;
        Ok(())
    }

    fn evaluate_sequential(
        &mut self,
        deadline: Option<Instant>,
        rule: impl Fn(bool, u8) -> bool,
    ) -> Result<()> {
        for row in 0..self.rows() {
            check_deadline(deadline)?;
            for col in 0..self.cols() {
                let neighbors = self.count_neighbors(row, col);
                let alive = rule(self.curr.get(row, col), neighbors);
                self.next.set(row, col, alive);
            }
        }
        Ok(())
    }
}

/// `band` holds whole rows of the next generation starting at `first_row`.
fn evaluate_band(
    src: &Grid,
    first_row: usize,
    band: &mut [bool],
    deadline: Option<Instant>,
    rule: impl Fn(bool, u8) -> bool,
) -> Result<()> {
    for (i, dst) in band.chunks_exact_mut(src.cols()).enumerate() {
        check_deadline(deadline)?;
        rules::update_row(src, first_row + i, dst, &rule);
    }
    Ok(())
}

fn check_deadline(deadline: Option<Instant>) -> Result<()> {
    match deadline {
        Some(d) if Instant::now() >= d => Err(LifeError::Cancelled),
        _ => Ok(()),
    }
}
