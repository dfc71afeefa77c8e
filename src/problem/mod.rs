use std::fmt;

use crate::state::StateRef;

mod hanoi;
mod loader;
mod maze;
mod sat;

pub use hanoi::{HanoiGenerator, HanoiState, Peg};
pub use loader::{LoaderError, ProblemSpec, load_problem, save_problem};
pub use maze::{Cell, MazeGenerator, MazeGrid, MazeState};
pub use sat::{Clause, Literal, SatGenerator, SatProblem, SatState};

/// Produces the initial state of one problem instance. Parameter validation
/// happens when the generator is constructed, never during the search.
pub trait Generator {
    fn generate(&mut self) -> StateRef;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    InvalidMazeDimensions { width: usize, height: usize },
    EmptySatShape,
    TooManySatVariables { num_variables: usize },
    TooFewPegs { num_pegs: usize },
    NoDiscs,
    TooManyDiscs { num_pegs: usize, num_discs: usize },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidMazeDimensions { width, height } => {
                write!(f, "maze width and height must be odd numbers >= 5, got {width}x{height}")
            }
            Self::EmptySatShape => {
                write!(f, "number of variables, clauses, and max literals per clause must be positive")
            }
            Self::TooManySatVariables { num_variables } => {
                write!(f, "at most 32 SAT variables are supported, got {num_variables}")
            }
            Self::TooFewPegs { num_pegs } => {
                write!(f, "number of pegs must be at least 3, got {num_pegs}")
            }
            Self::NoDiscs => write!(f, "number of discs must be at least 1"),
            Self::TooManyDiscs {
                num_pegs,
                num_discs,
            } => {
                write!(
                    f,
                    "disc configurations must fit a 64-bit identifier, got {num_pegs} pegs and {num_discs} discs"
                )
            }
        }
    }
}

impl std::error::Error for ProblemError {}
