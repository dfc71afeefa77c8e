use std::sync::Arc;

use rand::{RngExt, SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{Generator, ProblemError};
use crate::state::{State, StateRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Path,
    Start,
    Goal,
}

pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    #[inline]
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

/// Position of the walker inside a fixed maze. The grid itself is shared
/// between every state of one search.
pub struct MazeState {
    grid: Arc<MazeGrid>,
    position: (usize, usize),
    predecessor: Option<StateRef>,
}

impl MazeState {
    #[must_use]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }
}

impl State for MazeState {
    fn descendents(self: Arc<Self>) -> Vec<StateRef> {
        let (x, y) = self.position;
        let mut children: Vec<StateRef> = Vec::with_capacity(4);
        for (dx, dy) in [(0isize, -1isize), (0, 1), (-1, 0), (1, 0)] {
            let Some(nx) = x.checked_add_signed(dx) else {
                continue;
            };
            let Some(ny) = y.checked_add_signed(dy) else {
                continue;
            };
            if nx >= self.grid.width || ny >= self.grid.height {
                continue;
            }
            if self.grid.cell(nx, ny) == Cell::Wall {
                continue;
            }
            children.push(Arc::new(Self {
                grid: Arc::clone(&self.grid),
                position: (nx, ny),
                predecessor: Some(Arc::clone(&self) as StateRef),
            }));
        }
        children
    }

    fn is_goal(&self) -> bool {
        self.grid.cell(self.position.0, self.position.1) == Cell::Goal
    }

    fn identifier(&self) -> u64 {
        (self.position.1 * self.grid.width + self.position.0) as u64
    }

    fn predecessor(&self) -> Option<StateRef> {
        self.predecessor.clone()
    }
}

/// Recursive-backtracker maze generator. Width and height must be odd so the
/// carved corridors stay on odd cells with walls between them.
pub struct MazeGenerator {
    width: usize,
    height: usize,
    rng: StdRng,
}

impl MazeGenerator {
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Self, ProblemError> {
        if width % 2 == 0 || height % 2 == 0 || width < 5 || height < 5 {
            return Err(ProblemError::InvalidMazeDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn generate_maze(&mut self) -> Arc<MazeState> {
        let mut grid = MazeGrid {
            width: self.width,
            height: self.height,
            cells: vec![Cell::Wall; self.width * self.height],
        };

        // Odd cells only, so walls always separate corridors.
        let start_x = self.rng.random_range(0..(self.width - 1) / 2) * 2 + 1;
        let start_y = self.rng.random_range(0..(self.height - 1) / 2) * 2 + 1;
        self.carve(&mut grid, start_x, start_y);

        let (goal_x, goal_y) = loop {
            let x = self.rng.random_range(0..(self.width - 1) / 2) * 2 + 1;
            let y = self.rng.random_range(0..(self.height - 1) / 2) * 2 + 1;
            if grid.cell(x, y) == Cell::Path && (x, y) != (start_x, start_y) {
                break (x, y);
            }
        };

        grid.cells[start_y * self.width + start_x] = Cell::Start;
        grid.cells[goal_y * self.width + goal_x] = Cell::Goal;

        Arc::new(MazeState {
            grid: Arc::new(grid),
            position: (start_x, start_y),
            predecessor: None,
        })
    }

    fn carve(&mut self, grid: &mut MazeGrid, x: usize, y: usize) {
        if grid.cell(x, y) == Cell::Wall {
            grid.cells[y * grid.width + x] = Cell::Path;
        }

        let mut directions = [(0isize, -2isize), (0, 2), (-2, 0), (2, 0)];
        directions.shuffle(&mut self.rng);

        for (dx, dy) in directions {
            let Some(nx) = x.checked_add_signed(dx) else {
                continue;
            };
            let Some(ny) = y.checked_add_signed(dy) else {
                continue;
            };
            if nx == 0 || nx >= grid.width - 1 || ny == 0 || ny >= grid.height - 1 {
                continue;
            }
            if grid.cell(nx, ny) == Cell::Wall {
                // Knock out the wall between the two corridor cells.
                let wx = x.checked_add_signed(dx / 2).unwrap_or(x);
                let wy = y.checked_add_signed(dy / 2).unwrap_or(y);
                grid.cells[wy * grid.width + wx] = Cell::Path;
                self.carve(grid, nx, ny);
            }
        }
    }
}

impl Generator for MazeGenerator {
    fn generate(&mut self) -> StateRef {
        self.generate_maze()
    }
}
