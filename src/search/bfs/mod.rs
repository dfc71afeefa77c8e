use std::{collections::VecDeque, sync::Arc};

use super::{IdSet, Solver, default_num_threads};
use crate::state::StateRef;

mod parallel;

/// Breadth-first search over the state graph. Both variants return a goal at
/// minimum graph distance from the root; the parallel variant breaks ties
/// between same-depth goals by lowest identifier.
pub struct BfsSolver {
    root: StateRef,
    num_threads: usize,
}

impl BfsSolver {
    #[must_use]
    pub fn new(root: StateRef) -> Self {
        Self::with_threads(root, default_num_threads())
    }

    #[must_use]
    pub fn with_threads(root: StateRef, num_threads: usize) -> Self {
        Self {
            root,
            num_threads: num_threads.max(1),
        }
    }
}

impl Solver for BfsSolver {
    fn solve_seq(&self) -> Option<StateRef> {
        let mut visited = IdSet::default();
        let mut queue = VecDeque::new();
        queue.push_back(Arc::clone(&self.root));

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.identifier()) {
                continue;
            }
            if current.is_goal() {
                return Some(current);
            }
            for child in Arc::clone(&current).descendents() {
                if !visited.contains(&child.identifier()) {
                    queue.push_back(child);
                }
            }
        }
        None
    }

    fn solve_par(&self) -> Option<StateRef> {
        self.solve_levels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::{TestGraph, scenario_b_graph, shallow_goal_with_deeper_decoy};

    #[test]
    fn seq_finds_goal_on_chain() {
        let graph = TestGraph::chain(&[10, 11, 12]);
        let solution = BfsSolver::new(graph.root()).solve_seq();
        assert_eq!(solution.map(|s| s.identifier()), Some(12));
    }

    #[test]
    fn par_finds_goal_on_chain() {
        let graph = TestGraph::chain(&[10, 11, 12]);
        let solution = BfsSolver::with_threads(graph.root(), 4).solve_par();
        assert_eq!(solution.map(|s| s.identifier()), Some(12));
    }

    #[test]
    fn root_goal_returned_without_expansion() {
        let graph = TestGraph::single_goal_root(77);
        for parallel in [false, true] {
            let solver = BfsSolver::with_threads(graph.root(), 4);
            let solution = if parallel {
                solver.solve_par()
            } else {
                solver.solve_seq()
            };
            assert_eq!(solution.map(|s| s.identifier()), Some(77));
        }
        assert_eq!(graph.expansions(), 0);
    }

    #[test]
    fn exhausted_space_returns_none() {
        let graph = TestGraph::goalless_diamond();
        let solver = BfsSolver::with_threads(graph.root(), 4);
        assert!(solver.solve_seq().is_none());
        assert!(solver.solve_par().is_none());
    }

    #[test]
    fn seq_and_par_agree_on_solution_depth() {
        // Goal sits at depth 2 behind a deeper decoy branch.
        let graph = TestGraph::uneven_branches();
        let solver = BfsSolver::with_threads(graph.root(), 4);
        let seq = solver.solve_seq().expect("seq solution");
        let par = solver.solve_par().expect("par solution");
        assert_eq!(
            crate::state::solution_depth(&seq),
            crate::state::solution_depth(&par)
        );
    }

    #[test]
    fn par_tie_break_is_lowest_identifier() {
        for num_threads in [1, 2, 4, 8] {
            for _ in 0..10 {
                let graph = scenario_b_graph();
                let solution = BfsSolver::with_threads(graph.root(), num_threads)
                    .solve_par()
                    .expect("solution");
                assert_eq!(solution.identifier(), 40);
            }
        }
    }

    #[test]
    fn par_prefers_shallower_goal_over_lower_identifier() {
        // The identifier tie-break only applies among same-depth goals; the
        // level loop must stop at the first level holding a goal.
        for num_threads in [1, 2, 4, 8] {
            for _ in 0..10 {
                let graph = shallow_goal_with_deeper_decoy();
                let solution = BfsSolver::with_threads(graph.root(), num_threads)
                    .solve_par()
                    .expect("solution");
                assert_eq!(solution.identifier(), 41);
            }
        }
    }

    #[test]
    fn repeated_invocations_are_idempotent() {
        let graph = TestGraph::uneven_branches();
        let solver = BfsSolver::with_threads(graph.root(), 4);
        let first = solver.solve_par().map(|s| s.identifier());
        let second = solver.solve_par().map(|s| s.identifier());
        assert_eq!(first, second);
    }
}
