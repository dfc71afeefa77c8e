use std::{fmt, fs, io, path::Path};

use serde::{Deserialize, Serialize};

use super::{Generator, HanoiGenerator, MazeGenerator, ProblemError, SatGenerator};
use crate::state::StateRef;

/// On-disk description of a problem instance: the type tag plus the
/// parameters its generator needs. Serialized as YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "problem_type", rename_all = "lowercase")]
pub enum ProblemSpec {
    Maze {
        width: usize,
        height: usize,
        seed: u64,
    },
    Sat {
        num_variables: usize,
        num_clauses: usize,
        max_literals_per_clause: usize,
        seed: u64,
    },
    Hanoi {
        num_pegs: usize,
        num_discs: usize,
    },
}

impl ProblemSpec {
    pub fn build(&self) -> Result<StateRef, ProblemError> {
        match *self {
            Self::Maze {
                width,
                height,
                seed,
            } => Ok(MazeGenerator::new(width, height, seed)?.generate()),
            Self::Sat {
                num_variables,
                num_clauses,
                max_literals_per_clause,
                seed,
            } => Ok(
                SatGenerator::new(num_variables, num_clauses, max_literals_per_clause, seed)?
                    .generate(),
            ),
            Self::Hanoi {
                num_pegs,
                num_discs,
            } => Ok(HanoiGenerator::new(num_pegs, num_discs)?.generate()),
        }
    }
}

#[derive(Debug)]
pub enum LoaderError {
    Io(io::Error),
    Format(serde_yaml::Error),
    Problem(ProblemError),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "problem file i/o failed: {error}"),
            Self::Format(error) => write!(f, "problem file is malformed: {error}"),
            Self::Problem(error) => write!(f, "problem parameters are invalid: {error}"),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Format(error) => Some(error),
            Self::Problem(error) => Some(error),
        }
    }
}

impl From<io::Error> for LoaderError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_yaml::Error> for LoaderError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Format(error)
    }
}

impl From<ProblemError> for LoaderError {
    fn from(error: ProblemError) -> Self {
        Self::Problem(error)
    }
}

pub fn save_problem(path: &Path, spec: &ProblemSpec) -> Result<(), LoaderError> {
    let text = serde_yaml::to_string(spec)?;
    fs::write(path, text)?;
    Ok(())
}

pub fn load_problem(path: &Path) -> Result<StateRef, LoaderError> {
    let text = fs::read_to_string(path)?;
    let spec: ProblemSpec = serde_yaml::from_str(&text)?;
    Ok(spec.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("statespace-{}-{name}", std::process::id()))
    }

    #[test]
    fn round_trips_a_problem_spec() {
        let path = temp_file("hanoi.yaml");
        let spec = ProblemSpec::Hanoi {
            num_pegs: 3,
            num_discs: 4,
        };
        save_problem(&path, &spec).expect("save");
        let reread: ProblemSpec =
            serde_yaml::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(reread, spec);
        let state = load_problem(&path).expect("load");
        assert!(!state.is_goal());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn rejects_unknown_problem_type() {
        let parsed: Result<ProblemSpec, _> = serde_yaml::from_str("problem_type: chess\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_parameters_surface_as_problem_error() {
        let spec = ProblemSpec::Maze {
            width: 8,
            height: 9,
            seed: 0,
        };
        assert!(matches!(
            spec.build(),
            Err(ProblemError::InvalidMazeDimensions { .. })
        ));
    }
}
