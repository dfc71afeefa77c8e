//! Hand-built graphs with controlled identifiers, used to pin down solver
//! behavior (tie-breaks, visited scoping, expansion counts).

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::state::{State, StateRef};

struct TopologyNode {
    id: u64,
    goal: bool,
    children: Vec<usize>,
}

struct Topology {
    nodes: Vec<TopologyNode>,
    expansions: AtomicU64,
}

pub(crate) struct TestGraph {
    inner: Arc<Topology>,
}

struct GraphState {
    graph: Arc<Topology>,
    index: usize,
    predecessor: Option<StateRef>,
}

impl State for GraphState {
    fn descendents(self: Arc<Self>) -> Vec<StateRef> {
        self.graph.expansions.fetch_add(1, Ordering::SeqCst);
        self.graph.nodes[self.index]
            .children
            .iter()
            .map(|&index| {
                Arc::new(GraphState {
                    graph: Arc::clone(&self.graph),
                    index,
                    predecessor: Some(Arc::clone(&self) as StateRef),
                }) as StateRef
            })
            .collect()
    }

    fn is_goal(&self) -> bool {
        self.graph.nodes[self.index].goal
    }

    fn identifier(&self) -> u64 {
        self.graph.nodes[self.index].id
    }

    fn predecessor(&self) -> Option<StateRef> {
        self.predecessor.clone()
    }
}

impl TestGraph {
    /// Node 0 is the root. `(id, goal, children)` per node.
    pub(crate) fn from_nodes(nodes: Vec<(u64, bool, Vec<usize>)>) -> Self {
        let nodes = nodes
            .into_iter()
            .map(|(id, goal, children)| TopologyNode { id, goal, children })
            .collect();
        Self {
            inner: Arc::new(Topology {
                nodes,
                expansions: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn root(&self) -> StateRef {
        Arc::new(GraphState {
            graph: Arc::clone(&self.inner),
            index: 0,
            predecessor: None,
        })
    }

    /// Total `descendents` calls across every state of this graph so far.
    pub(crate) fn expansions(&self) -> u64 {
        self.inner.expansions.load(Ordering::SeqCst)
    }

    /// Linear chain; the last node is the only goal.
    pub(crate) fn chain(ids: &[u64]) -> Self {
        let last = ids.len() - 1;
        Self::from_nodes(
            ids.iter()
                .enumerate()
                .map(|(index, &id)| {
                    let children = if index < last { vec![index + 1] } else { vec![] };
                    (id, index == last, children)
                })
                .collect(),
        )
    }

    pub(crate) fn single_goal_root(id: u64) -> Self {
        Self::from_nodes(vec![(id, true, vec![])])
    }

    /// Finite DAG with no goal anywhere.
    pub(crate) fn goalless_diamond() -> Self {
        Self::from_nodes(vec![
            (1, false, vec![1, 2]),
            (2, false, vec![3]),
            (3, false, vec![3]),
            (4, false, vec![]),
        ])
    }

    /// A deep goalless decoy branch next to a goal at depth 2.
    pub(crate) fn uneven_branches() -> Self {
        Self::from_nodes(vec![
            (1, false, vec![1, 4]),  // root -> decoy, short
            (2, false, vec![2]),     // decoy chain
            (3, false, vec![3]),
            (5, false, vec![]),
            (6, false, vec![5]),     // short branch
            (7, true, vec![]),       // goal at depth 2
        ])
    }

    /// Two branches meeting at a join node two steps above the goal. The
    /// detour branch expands and backtracks through the join within bound 3
    /// before the direct edge reaches it one level shallower, so a visited
    /// mark left behind by the detour would hide the goal.
    pub(crate) fn diamond_with_goal_after_join() -> Self {
        Self::from_nodes(vec![
            (1, false, vec![1, 2]), // root -> detour, join
            (2, false, vec![2]),    // detour -> join
            (5, false, vec![3]),    // join -> mid
            (6, false, vec![4]),    // mid -> goal
            (90, true, vec![]),
        ])
    }
}

/// A goal with identifier 41 at depth 1 next to a branch leading to a goal
/// with identifier 40 at depth 3. Depth outranks the identifier tie-break,
/// so the shallow goal must win despite its higher identifier.
pub(crate) fn shallow_goal_with_deeper_decoy() -> TestGraph {
    TestGraph::from_nodes(vec![
        (1, false, vec![1, 2]),
        (41, true, vec![]),
        (3, false, vec![3]),
        (4, false, vec![4]),
        (40, true, vec![]),
    ])
}

/// Root with two branches, each reaching a distinct goal at depth 2. The
/// lower-identifier goal (40) sits on the branch explored second.
pub(crate) fn scenario_b_graph() -> TestGraph {
    TestGraph::from_nodes(vec![
        (1, false, vec![1, 2]),
        (2, false, vec![3]),
        (3, false, vec![4]),
        (41, true, vec![]),
        (40, true, vec![]),
    ])
}
