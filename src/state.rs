use std::sync::Arc;

pub type StateRef = Arc<dyn State>;

/// One point in a search space. Nodes are immutable once created; the
/// predecessor links form a write-once tree that is safe to walk from any
/// thread without synchronization.
pub trait State: Send + Sync {
    /// Freshly allocated successor states, each carrying a predecessor link
    /// back to this node. Evaluated per call, never cached.
    fn descendents(self: Arc<Self>) -> Vec<StateRef>;

    fn is_goal(&self) -> bool;

    /// Stable identifier of the node's content. Used as the visited-set key
    /// and as the tie-break key when several goals are discovered at once
    /// (lowest identifier wins).
    fn identifier(&self) -> u64;

    fn predecessor(&self) -> Option<StateRef>;
}

/// Number of predecessor links between `state` and the root.
#[must_use]
pub fn solution_depth(state: &StateRef) -> usize {
    let mut depth = 0usize;
    let mut current = Arc::clone(state);
    while let Some(previous) = current.predecessor() {
        depth += 1;
        current = previous;
    }
    depth
}
