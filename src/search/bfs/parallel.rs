use std::{
    mem,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use parking_lot::Mutex;

use super::BfsSolver;
use crate::search::IdSet;
use crate::state::StateRef;

/// Shared state of one level-synchronous expansion round: visited membership,
/// the frontier being built, and the best goal seen so far. All three sit
/// behind one lock so that a successor is tested, recorded and enqueued in a
/// single critical section; successor generation itself happens outside it.
struct LevelSync {
    visited: IdSet,
    next_level: Vec<StateRef>,
    best: Option<StateRef>,
}

impl LevelSync {
    fn admit(&mut self, child: StateRef) {
        let id = child.identifier();
        if !self.visited.insert(id) {
            return;
        }
        if child.is_goal()
            && self
                .best
                .as_ref()
                .is_none_or(|current| id < current.identifier())
        {
            self.best = Some(Arc::clone(&child));
        }
        self.next_level.push(child);
    }
}

impl BfsSolver {
    pub(super) fn solve_levels(&self) -> Option<StateRef> {
        if self.root.is_goal() {
            return Some(Arc::clone(&self.root));
        }

        let sync = Mutex::new(LevelSync {
            visited: IdSet::default(),
            next_level: Vec::new(),
            best: None,
        });
        sync.lock().visited.insert(self.root.identifier());
        let mut current_level = vec![Arc::clone(&self.root)];

        while !current_level.is_empty() {
            let cursor = AtomicUsize::new(0);
            thread::scope(|scope| {
                for _ in 0..self.num_threads {
                    scope.spawn(|| {
                        loop {
                            let index = cursor.fetch_add(1, Ordering::Relaxed);
                            let Some(state) = current_level.get(index) else {
                                break;
                            };
                            let children = Arc::clone(state).descendents();
                            let mut level = sync.lock();
                            for child in children {
                                level.admit(child);
                            }
                        }
                    });
                }
            });

            let mut level = sync.lock();
            if level.best.is_some() {
                return level.best.take();
            }
            current_level = mem::take(&mut level.next_level);
        }
        None
    }
}
