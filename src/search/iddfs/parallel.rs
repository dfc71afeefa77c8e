use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use super::IddfsSolver;
use crate::search::{IdSet, context::GoalSlot};
use crate::state::StateRef;

/// Per-invocation context of one parallel deepening pass: the shared best-goal
/// slot and the live count of outstanding task units, which throttles task
/// creation once it reaches the threshold. Dropped when the pass ends.
struct TaskContext {
    goal: GoalSlot,
    outstanding: AtomicUsize,
    spawn_threshold: usize,
}

impl IddfsSolver {
    pub(super) fn solve_tasks(&self) -> Option<StateRef> {
        let mut depth_limit = 0u32;
        loop {
            depth_limit += 1;
            if self.past_ceiling(depth_limit) {
                return None;
            }
            let ctx = TaskContext {
                goal: GoalSlot::new(),
                outstanding: AtomicUsize::new(0),
                spawn_threshold: self.spawn_threshold,
            };
            let mut visited = IdSet::default();
            Self::bounded_dfs_tasks(&self.root, depth_limit, 0, &mut visited, &ctx);
            if let Some(goal) = ctx.goal.take() {
                return Some(goal);
            }
        }
    }

    /// Depth-bounded DFS where each child expansion may be dispatched as an
    /// independent task unit while the outstanding count is below the
    /// threshold, and runs as synchronous recursion otherwise.
    ///
    /// A spawned unit takes its own clone of the visited set as of the spawn
    /// point, so the path-scoped marking discipline of the sequential variant
    /// holds exactly per branch and concurrent siblings cannot prune each
    /// other. The scope joins every unit spawned by this call before the call
    /// removes its own visited mark (fork, then join before backtrack).
    ///
    /// Once a goal is recorded, calls stop issuing new spawns; the bounded
    /// pass still completes, so the lowest-identifier goal within the bound
    /// always wins regardless of scheduling.
    fn bounded_dfs_tasks(
        state: &StateRef,
        depth_limit: u32,
        depth: u32,
        visited: &mut IdSet,
        ctx: &TaskContext,
    ) {
        if state.is_goal() {
            ctx.goal.offer(Arc::clone(state));
            return;
        }
        if depth >= depth_limit {
            return;
        }
        visited.insert(state.identifier());
        let children = Arc::clone(state).descendents();
        thread::scope(|scope| {
            for child in children {
                if visited.contains(&child.identifier()) {
                    continue;
                }
                let may_spawn = !ctx.goal.found()
                    && ctx.outstanding.load(Ordering::Acquire) < ctx.spawn_threshold;
                if may_spawn {
                    ctx.outstanding.fetch_add(1, Ordering::AcqRel);
                    let mut branch_visited = visited.clone();
                    scope.spawn(move || {
                        Self::bounded_dfs_tasks(
                            &child,
                            depth_limit,
                            depth + 1,
                            &mut branch_visited,
                            ctx,
                        );
                        ctx.outstanding.fetch_sub(1, Ordering::AcqRel);
                    });
                } else {
                    Self::bounded_dfs_tasks(&child, depth_limit, depth + 1, visited, ctx);
                }
            }
        });
        visited.remove(&state.identifier());
    }
}
