use std::num::NonZeroUsize;

use crate::state::StateRef;

mod bfs;
mod context;
mod iddfs;
#[cfg(test)]
pub(crate) mod testing;

pub use bfs::BfsSolver;
pub use iddfs::{DEFAULT_SPAWN_THRESHOLD, IddfsSolver};

pub(crate) type IdSet = hashbrown::HashSet<u64, ahash::RandomState>;

/// Common surface of the search strategies. Every `solve_*` call owns its
/// whole search state (visited sets, result slot, task accounting) and leaves
/// nothing behind for the next call.
pub trait Solver {
    /// `None` means the search space was exhausted without a goal. The IDDFS
    /// solver never exhausts on its own; see [`IddfsSolver`].
    fn solve_seq(&self) -> Option<StateRef>;

    fn solve_par(&self) -> Option<StateRef>;
}

#[must_use]
pub fn default_num_threads() -> usize {
    std::thread::available_parallelism().map_or(4, NonZeroUsize::get)
}
