use std::fmt;
use std::sync::Arc;

use rand::{RngExt, SeedableRng, rngs::StdRng};

use super::{Generator, ProblemError};
use crate::state::{State, StateRef};

/// A variable (numbered from 1) or its negation.
#[derive(Debug, Clone, Copy)]
pub struct Literal {
    pub variable_id: usize,
    pub negated: bool,
}

#[derive(Debug, Clone)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

/// CNF formula: a conjunction of disjunctive clauses.
#[derive(Debug, Clone)]
pub struct SatProblem {
    pub num_variables: usize,
    pub clauses: Vec<Clause>,
}

impl SatProblem {
    fn is_satisfied_by(&self, assignment: &[Option<bool>]) -> bool {
        self.clauses.iter().all(|clause| {
            clause.literals.iter().any(|literal| {
                assignment[literal.variable_id - 1]
                    .is_some_and(|value| value != literal.negated)
            })
        })
    }
}

impl fmt::Display for SatProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                write!(f, " & ")?;
            }
            write!(f, "(")?;
            for (literal_index, literal) in clause.literals.iter().enumerate() {
                if literal_index > 0 {
                    write!(f, " v ")?;
                }
                if literal.negated {
                    write!(f, "~")?;
                }
                write!(f, "{}", literal.variable_id)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A prefix assignment: variables 1..=k assigned, the rest free. Successors
/// assign the next free variable to true, then to false.
pub struct SatState {
    problem: Arc<SatProblem>,
    assignment: Vec<Option<bool>>,
    predecessor: Option<StateRef>,
}

impl SatState {
    #[must_use]
    pub fn root(problem: Arc<SatProblem>) -> Arc<Self> {
        let assignment = vec![None; problem.num_variables];
        Arc::new(Self {
            problem,
            assignment,
            predecessor: None,
        })
    }

    #[must_use]
    pub fn problem(&self) -> &SatProblem {
        &self.problem
    }

    #[must_use]
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }
}

impl State for SatState {
    fn descendents(self: Arc<Self>) -> Vec<StateRef> {
        if self.is_goal() {
            return Vec::new();
        }
        let Some(next_variable) = self.assignment.iter().position(Option::is_none) else {
            return Vec::new();
        };
        [true, false]
            .into_iter()
            .map(|value| {
                let mut assignment = self.assignment.clone();
                assignment[next_variable] = Some(value);
                Arc::new(Self {
                    problem: Arc::clone(&self.problem),
                    assignment,
                    predecessor: Some(Arc::clone(&self) as StateRef),
                }) as StateRef
            })
            .collect()
    }

    fn is_goal(&self) -> bool {
        self.assignment.iter().all(Option::is_some)
            && self.problem.is_satisfied_by(&self.assignment)
    }

    // 2 bits per variable: 0 unassigned, 1 false, 2 true. Requires at most
    // 32 variables, which the generator enforces.
    fn identifier(&self) -> u64 {
        let mut identifier = 0u64;
        for value in &self.assignment {
            identifier <<= 2;
            identifier += match *value {
                None => 0,
                Some(false) => 1,
                Some(true) => 2,
            };
        }
        identifier
    }

    fn predecessor(&self) -> Option<StateRef> {
        self.predecessor.clone()
    }
}

/// Random CNF generator: `num_clauses` clauses of 1..=`max_literals_per_clause`
/// literals, variables and polarities drawn uniformly.
pub struct SatGenerator {
    num_variables: usize,
    num_clauses: usize,
    max_literals_per_clause: usize,
    rng: StdRng,
}

impl SatGenerator {
    pub fn new(
        num_variables: usize,
        num_clauses: usize,
        max_literals_per_clause: usize,
        seed: u64,
    ) -> Result<Self, ProblemError> {
        if num_variables == 0 || num_clauses == 0 || max_literals_per_clause == 0 {
            return Err(ProblemError::EmptySatShape);
        }
        if num_variables > 32 {
            return Err(ProblemError::TooManySatVariables { num_variables });
        }
        Ok(Self {
            num_variables,
            num_clauses,
            max_literals_per_clause,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn generate_sat(&mut self) -> Arc<SatState> {
        let clauses = (0..self.num_clauses)
            .map(|_| {
                let num_literals = self.rng.random_range(1..=self.max_literals_per_clause);
                let literals = (0..num_literals)
                    .map(|_| Literal {
                        variable_id: self.rng.random_range(1..=self.num_variables),
                        negated: self.rng.random(),
                    })
                    .collect();
                Clause { literals }
            })
            .collect();
        SatState::root(Arc::new(SatProblem {
            num_variables: self.num_variables,
            clauses,
        }))
    }
}

impl Generator for SatGenerator {
    fn generate(&mut self) -> StateRef {
        self.generate_sat()
    }
}
