use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::data::Cell;
use crate::state::GridState;

/// An estimate of the remaining cost from a state, in keeper moves.
///
/// The search treats the estimate as a lower bound: an implementation
/// that overestimates silently forfeits the optimality guarantee, it is
/// not detected at runtime.
pub trait Heuristic {
    fn estimate(&self, state: &GridState) -> u32;
}

/// Any plain function over states works as a caller-supplied estimator.
impl<F> Heuristic for F
where
    F: Fn(&GridState) -> u32,
{
    fn estimate(&self, state: &GridState) -> u32 {
        self(state)
    }
}

/// The built-in estimators, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    /// Always 0 - degenerates A* to uniform-cost search.
    Zero,
    /// Number of boxes not on a goal.
    MisplacedBoxes,
    /// Sum over misplaced boxes of the Manhattan distance to the
    /// nearest goal cell.
    GoalDistance,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::Zero,
        HeuristicKind::MisplacedBoxes,
        HeuristicKind::GoalDistance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Zero => "h0",
            HeuristicKind::MisplacedBoxes => "h1",
            HeuristicKind::GoalDistance => "goal-distance",
        }
    }
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, state: &GridState) -> u32 {
        match *self {
            HeuristicKind::Zero => 0,
            HeuristicKind::MisplacedBoxes => misplaced_boxes(state),
            HeuristicKind::GoalDistance => goal_distance(state),
        }
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(String);

impl Display for UnknownHeuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown heuristic: {} (try h0, h1, goal-distance)", self.0)
    }
}

impl Error for UnknownHeuristic {}

impl FromStr for HeuristicKind {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h0" | "zero" => Ok(HeuristicKind::Zero),
            "h1" | "misplaced-boxes" => Ok(HeuristicKind::MisplacedBoxes),
            "goal-distance" => Ok(HeuristicKind::GoalDistance),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}

/// Admissible: every misplaced box needs at least one push.
pub fn misplaced_boxes(state: &GridState) -> u32 {
    state.cells().filter(|&cell| cell == Cell::Box).count() as u32
}

/// Admissible: one keeper action moves at most one box by one cell, so
/// the summed per-box distances to the nearest goal never overestimate.
/// Dominates `misplaced_boxes` (each term is at least 1).
pub fn goal_distance(state: &GridState) -> u32 {
    let goals: Vec<_> = state
        .positions()
        .filter(|&pos| state.cell(pos).is_goal())
        .collect();

    state
        .positions()
        .filter(|&pos| state.cell(pos) == Cell::Box)
        .map(|box_pos| {
            goals
                .iter()
                .map(|&goal| box_pos.dist(goal))
                .min()
                .unwrap_or(0)
        })
        .sum()
}
