use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::data::{Cell, Pos};
use crate::vec2d::Vec2d;

/// An immutable snapshot of a puzzle position.
///
/// Equality and hashing cover the whole code grid, cell for cell - two
/// positions reached along different paths compare equal, which is what
/// the search uses to deduplicate them. Walls never move, so carrying
/// them in every state costs memory but keeps the key self-contained.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GridState {
    grid: Vec2d<Cell>,
}

impl GridState {
    /// Builds a state from rows of numeric cell codes (0..=6).
    ///
    /// Rows of unequal length are padded with empty floor. Codes outside
    /// the alphabet are a caller error.
    pub fn from_rows(rows: &[&[u8]]) -> GridState {
        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&code| {
                        Cell::from_code(code)
                            .unwrap_or_else(|| panic!("cell code {} outside 0..=6", code))
                    })
                    .collect()
            })
            .collect();
        GridState {
            grid: Vec2d::from_rows(&cells, Cell::Floor),
        }
    }

    pub(crate) fn new(grid: Vec2d<Cell>) -> GridState {
        GridState { grid }
    }

    pub fn rows(&self) -> u8 {
        self.grid.rows()
    }

    pub fn cols(&self) -> u8 {
        self.grid.cols()
    }

    /// Cell at `pos`; anything outside the grid reads as a wall, so
    /// callers never need a separate bounds check.
    pub fn cell(&self, pos: Pos) -> Cell {
        self.grid.get(pos).copied().unwrap_or(Cell::Wall)
    }

    pub(crate) fn set(&mut self, pos: Pos, cell: Cell) {
        self.grid[pos] = cell;
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.grid.iter().copied()
    }

    /// All in-bounds positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let rows = i16::from(self.rows());
        let cols = i16::from(self.cols());
        (0..rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    /// Position of the keeper. Well-formed states have exactly one.
    pub fn keeper_pos(&self) -> Pos {
        self.positions()
            .find(|&pos| self.cell(pos).has_keeper())
            .expect("state has no keeper cell")
    }

    pub fn box_count(&self) -> usize {
        self.cells().filter(|cell| cell.has_box()).count()
    }

    pub fn goal_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_goal()).count()
    }
}

impl Display for GridState {
    /// XSB notation, one line per row.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for pos in self.positions() {
            let ch = match self.cell(pos) {
                Cell::Floor => ' ',
                Cell::Wall => '#',
                Cell::Box => '$',
                Cell::Keeper => '@',
                Cell::Goal => '.',
                Cell::BoxOnGoal => '*',
                Cell::KeeperOnGoal => '+',
            };
            write!(f, "{}", ch)?;
            if pos.c == i16::from(self.cols()) - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Debug for GridState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
