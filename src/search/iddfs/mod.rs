use std::sync::Arc;

use super::{IdSet, Solver};
use crate::state::StateRef;

mod parallel;

pub const DEFAULT_SPAWN_THRESHOLD: usize = 8;

/// Iterative-deepening depth-first search. The depth bound starts at 1 and
/// grows by 1 after every unsuccessful bounded pass. Visited marking is
/// path-scoped: a node is marked on entry to its subtree and unmarked on
/// exit, so the same node stays reachable through disjoint branches.
///
/// On a graph with no reachable goal the deepening loop never terminates;
/// callers that need finite termination must set a depth ceiling with
/// [`Self::with_depth_ceiling`], which turns exhaustion of the ceiling into
/// a `None` result.
pub struct IddfsSolver {
    root: StateRef,
    spawn_threshold: usize,
    depth_ceiling: Option<u32>,
}

impl IddfsSolver {
    #[must_use]
    pub fn new(root: StateRef) -> Self {
        Self {
            root,
            spawn_threshold: DEFAULT_SPAWN_THRESHOLD,
            depth_ceiling: None,
        }
    }

    #[must_use]
    pub const fn with_depth_ceiling(mut self, ceiling: u32) -> Self {
        self.depth_ceiling = Some(ceiling);
        self
    }

    /// Maximum number of concurrently outstanding task units `solve_par` may
    /// have in flight before it falls back to synchronous recursion. A
    /// threshold of 0 makes the parallel variant fully synchronous.
    #[must_use]
    pub const fn with_spawn_threshold(mut self, threshold: usize) -> Self {
        self.spawn_threshold = threshold;
        self
    }

    fn past_ceiling(&self, depth_limit: u32) -> bool {
        self.depth_ceiling
            .is_some_and(|ceiling| depth_limit > ceiling)
    }

    fn bounded_dfs(
        state: &StateRef,
        depth_limit: u32,
        depth: u32,
        visited: &mut IdSet,
    ) -> Option<StateRef> {
        if state.is_goal() {
            return Some(Arc::clone(state));
        }
        if depth >= depth_limit {
            return None;
        }
        visited.insert(state.identifier());
        let mut result = None;
        for child in Arc::clone(state).descendents() {
            if visited.contains(&child.identifier()) {
                continue;
            }
            result = Self::bounded_dfs(&child, depth_limit, depth + 1, visited);
            if result.is_some() {
                break;
            }
        }
        visited.remove(&state.identifier());
        result
    }
}

impl Solver for IddfsSolver {
    fn solve_seq(&self) -> Option<StateRef> {
        let mut visited = IdSet::default();
        let mut depth_limit = 0u32;
        loop {
            depth_limit += 1;
            if self.past_ceiling(depth_limit) {
                return None;
            }
            if let Some(goal) = Self::bounded_dfs(&self.root, depth_limit, 0, &mut visited) {
                return Some(goal);
            }
        }
    }

    fn solve_par(&self) -> Option<StateRef> {
        self.solve_tasks()
    }
}
