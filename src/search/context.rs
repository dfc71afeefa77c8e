use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::state::StateRef;

/// Best-goal slot shared by the workers of a single solve invocation. The
/// lowest identifier wins, so the recorded result does not depend on which
/// thread reported its goal first.
pub(crate) struct GoalSlot {
    best: Mutex<Option<StateRef>>,
    found: AtomicBool,
}

impl GoalSlot {
    pub(crate) fn new() -> Self {
        Self {
            best: Mutex::new(None),
            found: AtomicBool::new(false),
        }
    }

    pub(crate) fn offer(&self, candidate: StateRef) {
        let mut best = self.best.lock();
        let better = best
            .as_ref()
            .is_none_or(|current| candidate.identifier() < current.identifier());
        if better {
            *best = Some(candidate);
        }
        self.found.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    pub(crate) fn take(&self) -> Option<StateRef> {
        self.best.lock().take()
    }
}
