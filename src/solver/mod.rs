pub mod a_star;

use log::debug;

use crate::data::{Cell, DIRECTIONS};
use crate::heuristic::HeuristicKind;
use crate::state::GridState;

use self::a_star::{a_star_search, SearchOutcome};

/// True iff no box is off a goal. The keeper's own position is
/// irrelevant, and leftover empty goals don't matter either.
pub fn goal_test(state: &GridState) -> bool {
    state.cells().all(|cell| cell != Cell::Box)
}

/// All states reachable from `state` by one keeper action, in no
/// particular order.
///
/// Each of the four directions is checked independently against the
/// unmodified input: stepping onto free floor or a free goal moves the
/// keeper; stepping into a box pushes it one cell further, which is
/// only legal when that cell is free. Walls and the grid boundary block
/// both. Illegal directions are simply omitted. Duplicate elimination
/// across the search graph is the engine's job, not this function's.
pub fn next_states(state: &GridState) -> Vec<GridState> {
    let keeper = state.keeper_pos();
    let mut new_states = Vec::new();

    for &dir in &DIRECTIONS {
        let target = keeper + dir;
        let target_cell = state.cell(target);

        if target_cell.is_free() {
            // step
            let mut next = state.clone();
            next.set(keeper, state.cell(keeper).clear_keeper());
            next.set(target, target_cell.place_keeper());
            new_states.push(next);
        } else if target_cell.has_box() {
            let beyond = target + dir;
            let beyond_cell = state.cell(beyond);
            if !beyond_cell.is_free() {
                // wall, another box or off the grid
                continue;
            }

            // push
            let mut next = state.clone();
            next.set(keeper, state.cell(keeper).clear_keeper());
            next.set(target, target_cell.place_keeper());
            next.set(beyond, beyond_cell.place_box());
            new_states.push(next);
        }
    }

    new_states
}

/// Runs the search with the canonical predicate and generator.
pub fn solve(start: &GridState, kind: HeuristicKind) -> SearchOutcome {
    debug!("solving with {}", kind);
    a_star_search(start, goal_test, next_states, &kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_successors(start: &[&[u8]], expected: &[&[&[u8]]]) {
        let start = GridState::from_rows(start);
        let received = next_states(&start);
        let expected: Vec<GridState> = expected.iter().map(|rows| GridState::from_rows(rows)).collect();

        // no ordering guarantee - compare as sets, both directions
        for state in &received {
            assert!(
                expected.contains(state),
                "unexpected successor of\n{}:\n{}",
                start,
                state
            );
        }
        for state in &expected {
            assert!(
                received.contains(state),
                "missing successor of\n{}:\n{}",
                start,
                state
            );
        }
    }

    #[test]
    fn goal_state_with_leftover_goal_cells() {
        let solved = GridState::from_rows(&[&[1, 1, 1], &[1, 6, 1], &[1, 5, 1], &[1, 4, 1], &[1, 1, 1]]);
        assert!(goal_test(&solved));
    }

    #[test]
    fn non_goal_state() {
        let state = GridState::from_rows(&[&[1, 1, 1, 1], &[1, 3, 2, 1], &[1, 4, 5, 1], &[1, 1, 1, 1]]);
        assert!(!goal_test(&state));
    }

    #[test]
    fn enclosed_keeper_has_no_successors() {
        assert_successors(&[&[0, 1, 0], &[1, 3, 1], &[0, 1, 0]], &[]);
    }

    #[test]
    fn moves_into_blanks_are_symmetric() {
        assert_successors(
            &[&[0, 0, 0], &[0, 3, 0], &[0, 0, 0]],
            &[
                &[&[0, 3, 0], &[0, 0, 0], &[0, 0, 0]],
                &[&[0, 0, 0], &[0, 0, 0], &[0, 3, 0]],
                &[&[0, 0, 0], &[3, 0, 0], &[0, 0, 0]],
                &[&[0, 0, 0], &[0, 0, 3], &[0, 0, 0]],
            ],
        );
    }

    #[test]
    fn move_onto_goal_sets_keeper_goal_code() {
        assert_successors(
            &[&[1, 1, 1], &[1, 4, 3], &[1, 1, 1]],
            &[&[&[1, 1, 1], &[1, 6, 0], &[1, 1, 1]]],
        );
    }

    #[test]
    fn move_off_goal_restores_goal_code() {
        assert_successors(
            &[&[1, 1, 1], &[6, 0, 1], &[1, 1, 1]],
            &[&[&[1, 1, 1], &[4, 3, 1], &[1, 1, 1]]],
        );
    }

    #[test]
    fn move_between_goals() {
        assert_successors(
            &[&[1, 1, 1], &[0, 4, 6], &[1, 1, 1]],
            &[&[&[1, 1, 1], &[0, 6, 4], &[1, 1, 1]]],
        );
    }

    #[test]
    fn push_into_blank() {
        assert_successors(
            &[&[1, 1, 1], &[3, 2, 0], &[1, 1, 1]],
            &[&[&[1, 1, 1], &[0, 3, 2], &[1, 1, 1]]],
        );
    }

    #[test]
    fn push_into_wall_is_illegal() {
        assert_successors(&[&[1, 1, 1], &[3, 2, 1], &[1, 1, 1]], &[]);
    }

    #[test]
    fn push_into_box_is_illegal() {
        assert_successors(&[&[1, 1, 1], &[3, 2, 2], &[1, 1, 1]], &[]);
    }

    #[test]
    fn push_off_grid_is_illegal() {
        // no wall row below - the boundary itself blocks the push
        assert_successors(&[&[1, 3, 1], &[1, 2, 1]], &[]);
    }

    #[test]
    fn push_onto_goal() {
        assert_successors(
            &[&[1, 1, 1], &[4, 2, 3], &[1, 1, 1]],
            &[&[&[1, 1, 1], &[5, 3, 0], &[1, 1, 1]]],
        );
    }

    #[test]
    fn push_off_goal_keeps_goal_under_keeper() {
        assert_successors(
            &[&[1, 3, 1], &[1, 5, 1], &[1, 0, 1]],
            &[&[&[1, 0, 1], &[1, 6, 1], &[1, 2, 1]]],
        );
    }

    #[test]
    fn push_between_goals() {
        assert_successors(
            &[&[1, 4, 1], &[1, 5, 1], &[1, 3, 1]],
            &[&[&[1, 5, 1], &[1, 6, 1], &[1, 0, 1]]],
        );
    }

    #[test]
    fn mixed_moves_and_push() {
        assert_successors(
            &[
                &[1, 1, 1, 1, 1],
                &[1, 0, 0, 4, 1],
                &[1, 0, 2, 0, 1],
                &[1, 0, 3, 0, 1],
                &[1, 0, 0, 0, 1],
                &[1, 1, 1, 1, 1],
            ],
            &[
                &[
                    &[1, 1, 1, 1, 1],
                    &[1, 0, 2, 4, 1],
                    &[1, 0, 3, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 1, 1, 1, 1],
                ],
                &[
                    &[1, 1, 1, 1, 1],
                    &[1, 0, 0, 4, 1],
                    &[1, 0, 2, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 0, 3, 0, 1],
                    &[1, 1, 1, 1, 1],
                ],
                &[
                    &[1, 1, 1, 1, 1],
                    &[1, 0, 0, 4, 1],
                    &[1, 0, 2, 0, 1],
                    &[1, 3, 0, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 1, 1, 1, 1],
                ],
                &[
                    &[1, 1, 1, 1, 1],
                    &[1, 0, 0, 4, 1],
                    &[1, 0, 2, 0, 1],
                    &[1, 0, 0, 3, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 1, 1, 1, 1],
                ],
            ],
        );
    }

    #[test]
    fn keeper_next_to_goal_and_box() {
        assert_successors(
            &[
                &[1, 1, 1, 1, 1],
                &[1, 0, 0, 4, 1],
                &[1, 0, 2, 3, 1],
                &[1, 0, 0, 0, 1],
                &[1, 0, 0, 0, 1],
                &[1, 1, 1, 1, 1],
            ],
            &[
                &[
                    &[1, 1, 1, 1, 1],
                    &[1, 0, 0, 6, 1],
                    &[1, 0, 2, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 1, 1, 1, 1],
                ],
                &[
                    &[1, 1, 1, 1, 1],
                    &[1, 0, 0, 4, 1],
                    &[1, 0, 2, 0, 1],
                    &[1, 0, 0, 3, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 1, 1, 1, 1],
                ],
                &[
                    &[1, 1, 1, 1, 1],
                    &[1, 0, 0, 4, 1],
                    &[1, 2, 3, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 0, 0, 0, 1],
                    &[1, 1, 1, 1, 1],
                ],
            ],
        );
    }

    #[test]
    fn keeper_on_goal_surrounded_by_goal_boxes() {
        // every kind of cell rewrite in one position
        assert_successors(
            &[
                &[1, 0, 1, 1],
                &[1, 2, 1, 1],
                &[4, 6, 5, 0],
                &[1, 5, 1, 1],
                &[1, 4, 1, 1],
            ],
            &[
                // down: push a box off its goal onto another goal
                &[
                    &[1, 0, 1, 1],
                    &[1, 2, 1, 1],
                    &[4, 4, 5, 0],
                    &[1, 6, 1, 1],
                    &[1, 5, 1, 1],
                ],
                // left: plain step onto a goal
                &[
                    &[1, 0, 1, 1],
                    &[1, 2, 1, 1],
                    &[6, 4, 5, 0],
                    &[1, 5, 1, 1],
                    &[1, 4, 1, 1],
                ],
                // up: push a box onto plain floor
                &[
                    &[1, 2, 1, 1],
                    &[1, 3, 1, 1],
                    &[4, 4, 5, 0],
                    &[1, 5, 1, 1],
                    &[1, 4, 1, 1],
                ],
                // right: push a box off its goal onto plain floor
                &[
                    &[1, 0, 1, 1],
                    &[1, 2, 1, 1],
                    &[4, 4, 6, 2],
                    &[1, 5, 1, 1],
                    &[1, 4, 1, 1],
                ],
            ],
        );
    }

    #[test]
    fn successors_conserve_boxes_goals_and_keeper() {
        let starts: Vec<GridState> = vec![
            GridState::from_rows(&[
                &[1, 1, 1, 1, 1, 1],
                &[1, 0, 3, 0, 0, 1],
                &[1, 0, 2, 0, 0, 1],
                &[1, 1, 0, 1, 1, 1],
                &[1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 4, 1],
                &[1, 1, 1, 1, 1, 1],
            ]),
            GridState::from_rows(&[
                &[1, 0, 1, 1],
                &[1, 2, 1, 1],
                &[4, 6, 5, 0],
                &[1, 5, 1, 1],
                &[1, 4, 1, 1],
            ]),
        ];
        for start in &starts {
            for successor in next_states(start) {
                assert_eq!(successor.box_count(), start.box_count());
                assert_eq!(successor.goal_count(), start.goal_count());
                assert_eq!(successor.rows(), start.rows());
                assert_eq!(successor.cols(), start.cols());
                let keepers = successor.cells().filter(|c| c.has_keeper()).count();
                assert_eq!(keepers, 1);
                let walls = successor.cells().filter(|&c| c == Cell::Wall).count();
                assert_eq!(walls, start.cells().filter(|&c| c == Cell::Wall).count());
            }
        }
    }
}
