// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod catalog;
pub mod heuristic;
pub mod solver;

mod data;
mod parser;
mod state;
mod vec2d;

pub use crate::data::{Cell, Dir, Pos, DIRECTIONS};
pub use crate::heuristic::{goal_distance, misplaced_boxes, Heuristic, HeuristicKind};
pub use crate::parser::ParserErr;
pub use crate::solver::a_star::{
    a_star_search, NodeId, SearchNode, SearchOutcome, SearchTree, Stats,
};
pub use crate::solver::{goal_test, next_states, solve};
pub use crate::state::GridState;
