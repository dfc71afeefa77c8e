use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::{Generator, ProblemError};
use crate::state::{State, StateRef};

pub type Peg = SmallVec<[u8; 8]>;

/// Configuration of the pegs; discs are numbered 1 (smallest) to
/// `num_discs`, stacked bottom-to-top in each peg vector.
pub struct HanoiState {
    num_pegs: usize,
    num_discs: usize,
    pegs: Vec<Peg>,
    predecessor: Option<StateRef>,
}

impl HanoiState {
    #[must_use]
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }
}

impl fmt::Display for HanoiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, peg) in self.pegs.iter().enumerate() {
            write!(f, "Peg {index}:")?;
            for disc in peg {
                write!(f, " {disc}")?;
            }
            writeln!(f)?;
        }
        write!(f, "----")
    }
}

impl State for HanoiState {
    fn descendents(self: Arc<Self>) -> Vec<StateRef> {
        let mut children: Vec<StateRef> = Vec::new();
        for from_peg in 0..self.num_pegs {
            let Some(&disc) = self.pegs[from_peg].last() else {
                continue;
            };
            for to_peg in 0..self.num_pegs {
                if to_peg == from_peg {
                    continue;
                }
                if self.pegs[to_peg].last().is_some_and(|&top| top < disc) {
                    continue;
                }
                let mut pegs = self.pegs.clone();
                pegs[from_peg].pop();
                pegs[to_peg].push(disc);
                children.push(Arc::new(Self {
                    num_pegs: self.num_pegs,
                    num_discs: self.num_discs,
                    pegs,
                    predecessor: Some(Arc::clone(&self) as StateRef),
                }));
            }
        }
        children
    }

    fn is_goal(&self) -> bool {
        self.pegs[self.num_pegs - 1].len() == self.num_discs
    }

    // Positional encoding: the peg index of each disc is one digit in base
    // `num_pegs`, so distinct configurations never collide.
    fn identifier(&self) -> u64 {
        let mut disc_peg = vec![0u64; self.num_discs];
        for (peg_index, peg) in self.pegs.iter().enumerate() {
            for &disc in peg {
                disc_peg[usize::from(disc) - 1] = peg_index as u64;
            }
        }
        disc_peg
            .iter()
            .rev()
            .fold(0u64, |identifier, &peg_index| {
                identifier * self.num_pegs as u64 + peg_index
            })
    }

    fn predecessor(&self) -> Option<StateRef> {
        self.predecessor.clone()
    }
}

pub struct HanoiGenerator {
    num_pegs: usize,
    num_discs: usize,
}

impl HanoiGenerator {
    pub fn new(num_pegs: usize, num_discs: usize) -> Result<Self, ProblemError> {
        if num_pegs < 3 {
            return Err(ProblemError::TooFewPegs { num_pegs });
        }
        if num_discs == 0 {
            return Err(ProblemError::NoDiscs);
        }
        // Discs are stored as u8 and the identifier is one base-num_pegs
        // digit per disc, so every configuration must fit a u64.
        let fits_u64 = u32::try_from(num_discs)
            .ok()
            .and_then(|discs| (num_pegs as u64).checked_pow(discs))
            .is_some();
        if num_discs > 255 || !fits_u64 {
            return Err(ProblemError::TooManyDiscs {
                num_pegs,
                num_discs,
            });
        }
        Ok(Self {
            num_pegs,
            num_discs,
        })
    }

    /// All discs start on peg 0, largest at the bottom.
    #[must_use]
    pub fn generate_hanoi(&self) -> Arc<HanoiState> {
        let mut pegs = vec![Peg::new(); self.num_pegs];
        for disc in (1..=self.num_discs).rev() {
            pegs[0].push(disc as u8);
        }
        Arc::new(HanoiState {
            num_pegs: self.num_pegs,
            num_discs: self.num_discs,
            pegs,
            predecessor: None,
        })
    }
}

impl Generator for HanoiGenerator {
    fn generate(&mut self) -> StateRef {
        self.generate_hanoi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BfsSolver, IddfsSolver, Solver};
    use crate::state::solution_depth;

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(HanoiGenerator::new(2, 3).is_err());
        assert!(HanoiGenerator::new(3, 0).is_err());
        assert!(HanoiGenerator::new(3, 1).is_ok());
    }

    #[test]
    fn rejects_shapes_overflowing_the_identifier() {
        // u8 discs cap the count at 255 even where the pegs would fit.
        assert!(matches!(
            HanoiGenerator::new(3, 256),
            Err(ProblemError::TooManyDiscs { .. })
        ));
        // 3^41 does not fit a u64; 3^40 does.
        assert!(matches!(
            HanoiGenerator::new(3, 41),
            Err(ProblemError::TooManyDiscs { .. })
        ));
        assert!(HanoiGenerator::new(3, 40).is_ok());
        // 4^32 == 2^64 overflows, 4^31 fits.
        assert!(HanoiGenerator::new(4, 32).is_err());
        assert!(HanoiGenerator::new(4, 31).is_ok());
    }

    #[test]
    fn identifiers_distinguish_configurations() {
        let root = HanoiGenerator::new(3, 2).unwrap().generate_hanoi();
        let root_id = root.identifier();
        let children = Arc::clone(&root).descendents();
        let mut seen: Vec<u64> = children.iter().map(|c| c.identifier()).collect();
        seen.push(root_id);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), children.len() + 1);
    }

    #[test]
    fn two_discs_solved_optimally_by_bfs() {
        let root: StateRef = HanoiGenerator::new(3, 2).unwrap().generate_hanoi();
        let bfs = BfsSolver::with_threads(Arc::clone(&root), 4);
        let seq = bfs.solve_seq().expect("bfs seq");
        let par = bfs.solve_par().expect("bfs par");
        assert_eq!(solution_depth(&seq), 3);
        assert_eq!(solution_depth(&par), 3);
    }

    #[test]
    fn iddfs_solves_two_discs() {
        let root: StateRef = HanoiGenerator::new(3, 2).unwrap().generate_hanoi();
        let iddfs = IddfsSolver::new(root);
        assert!(iddfs.solve_seq().expect("iddfs seq").is_goal());
        assert!(iddfs.solve_par().expect("iddfs par").is_goal());
    }
}
