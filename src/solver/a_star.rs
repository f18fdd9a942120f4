use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::fmt::{Display, Formatter};

use fnv::FnvHashMap;
use log::{debug, info};
use separator::Separatable;

use crate::heuristic::Heuristic;
use crate::state::GridState;

/// Handle into a `SearchTree`. Handles are dense and allocated in
/// creation order, so they double as insertion order for tie-breaking.
pub type NodeId = u32;

#[derive(Debug)]
pub struct SearchNode {
    pub state: GridState,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    /// Cost so far - depth, since every action costs 1.
    pub dist: u32,
    /// Heuristic estimate at creation time.
    pub h: u32,
}

/// Arena of search nodes. Parent links are handles rather than
/// references, so the tree needs no lifetime juggling and path
/// reconstruction is a plain index walk.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    fn add(&mut self, state: GridState, parent: Option<NodeId>, dist: u32, h: u32) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(SearchNode {
            state,
            parent,
            dist,
            h,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of parent links between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut node = self.node(id);
        while let Some(parent) = node.parent {
            node = self.node(parent);
            depth += 1;
        }
        depth
    }

    /// States along the path from the root to `id`, root first.
    pub fn path_states(&self, id: NodeId) -> Vec<GridState> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(id) = cur {
            let node = self.node(id);
            path.push(node.state.clone());
            cur = node.parent;
        }
        path.reverse();
        path
    }
}

/// Frontier entry. Derived `Ord` compares `(f, dist, id)` field by
/// field: lowest f first, ties to the smaller cost-so-far, then to the
/// earlier-created node - deterministic across runs.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f: u32,
    dist: u32,
    id: NodeId,
}

/// Search counters, kept per depth like the solver has always reported
/// them - the by-depth profile shows where a heuristic stops helping.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stats {
    created: Vec<u32>,
    visited: Vec<u32>,
    pruned: Vec<u32>,
    stale_skipped: u32,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> u32 {
        self.created.iter().sum()
    }

    pub fn total_visited(&self) -> u32 {
        self.visited.iter().sum()
    }

    pub fn total_pruned(&self) -> u32 {
        self.pruned.iter().sum()
    }

    pub fn stale_skipped(&self) -> u32 {
        self.stale_skipped
    }

    fn add_created(&mut self, dist: u32) {
        Self::add(&mut self.created, dist);
    }

    /// Returns true when `dist` is a previously unvisited depth.
    fn add_visited(&mut self, dist: u32) -> bool {
        Self::add(&mut self.visited, dist)
    }

    fn add_pruned(&mut self, dist: u32) {
        Self::add(&mut self.pruned, dist);
    }

    fn add_stale_skipped(&mut self) {
        self.stale_skipped += 1;
    }

    fn add(counts: &mut Vec<u32>, dist: u32) -> bool {
        let mut new_depth = false;
        // while because depths can be skipped when duplicates are pruned
        while dist as usize >= counts.len() {
            counts.push(0);
            new_depth = true;
        }
        counts[dist as usize] += 1;
        new_depth
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Nodes created total: {}",
            self.total_created().separated_string()
        )?;
        writeln!(
            f,
            "Unique states visited total: {}",
            self.total_visited().separated_string()
        )?;
        writeln!(
            f,
            "Duplicate successors pruned total: {}",
            self.total_pruned().separated_string()
        )?;
        writeln!(
            f,
            "Stale heap entries skipped: {}",
            self.stale_skipped.separated_string()
        )
    }
}

/// Result of one search run: the goal handle (if any), the node arena
/// for walking parent links, and the counters.
#[derive(Debug)]
pub struct SearchOutcome {
    pub goal: Option<NodeId>,
    pub tree: SearchTree,
    pub stats: Stats,
}

impl SearchOutcome {
    /// Solution length in keeper moves, `None` when the puzzle has no
    /// solution.
    pub fn depth(&self) -> Option<usize> {
        self.goal.map(|id| self.tree.depth(id))
    }

    pub fn path_states(&self) -> Option<Vec<GridState>> {
        self.goal.map(|id| self.tree.path_states(id))
    }
}

/// Best-first search over the implicit state graph.
///
/// Pops the frontier entry with the lowest `f = dist + h` and returns
/// the first popped node that satisfies `goal_test` - with an
/// admissible heuristic that node's depth is minimal. Every discovered
/// state maps to the best cost found for it so far; a successor already
/// known at an equal or lower cost is pruned, a cheaper rediscovery
/// (possible with admissible but inconsistent heuristics) re-enters the
/// frontier and the superseded entry is skipped when it surfaces.
///
/// An exhausted frontier means the puzzle is unsolvable - a normal
/// outcome, not an error.
pub fn a_star_search<G, S, H>(
    start: &GridState,
    goal_test: G,
    next_states: S,
    heuristic: &H,
) -> SearchOutcome
where
    G: Fn(&GridState) -> bool,
    S: Fn(&GridState) -> Vec<GridState>,
    H: Heuristic + ?Sized,
{
    let mut tree = SearchTree::default();
    let mut stats = Stats::new();
    let mut open = BinaryHeap::new();
    let mut best_cost: FnvHashMap<GridState, u32> = FnvHashMap::default();

    let h = heuristic.estimate(start);
    let root = tree.add(start.clone(), None, 0, h);
    best_cost.insert(start.clone(), 0);
    stats.add_created(0);
    open.push(Reverse(OpenEntry {
        f: h,
        dist: 0,
        id: root,
    }));

    while let Some(Reverse(entry)) = open.pop() {
        let id = entry.id;
        if entry.dist > best_cost[&tree.node(id).state] {
            // a cheaper path to this state was queued after this entry
            stats.add_stale_skipped();
            continue;
        }

        if stats.add_visited(entry.dist) {
            info!(
                "visited new depth {} ({} created, {} visited)",
                entry.dist,
                stats.total_created().separated_string(),
                stats.total_visited().separated_string(),
            );
        }

        if goal_test(&tree.node(id).state) {
            debug!("goal found at depth {}", entry.dist);
            return SearchOutcome {
                goal: Some(id),
                tree,
                stats,
            };
        }

        let next_dist = entry.dist + 1;
        for successor in next_states(&tree.node(id).state) {
            if let Some(&best) = best_cost.get(&successor) {
                if best <= next_dist {
                    stats.add_pruned(next_dist);
                    continue;
                }
            }
            best_cost.insert(successor.clone(), next_dist);
            let h = heuristic.estimate(&successor);
            let successor_id = tree.add(successor, Some(id), next_dist, h);
            stats.add_created(next_dist);
            open.push(Reverse(OpenEntry {
                f: next_dist + h,
                dist: next_dist,
                id: successor_id,
            }));
        }
    }

    debug!("frontier exhausted, no solution");
    SearchOutcome {
        goal: None,
        tree,
        stats,
    }
}
