use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::data::{Cell, MAX_SIZE};
use crate::state::GridState;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    InvalidCell(usize, usize),
    TooLarge,
    Empty,
    NoKeeper,
    MultipleKeepers,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::InvalidCell(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Level larger than {} rows/columns", MAX_SIZE),
            ParserErr::Empty => write!(f, "Level has no cells"),
            ParserErr::NoKeeper => write!(f, "No keeper"),
            ParserErr::MultipleKeepers => write!(f, "More than one keeper"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for GridState {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses XSB notation: `#` wall, `@` keeper, `+` keeper on goal,
/// `$` box, `*` box on goal, `.` goal, space (or `-`/`_`) floor.
pub(crate) fn parse(level: &str) -> Result<GridState, ParserErr> {
    // trim so levels can be written as raw strings
    let level = level.trim_matches('\n').trim_end();

    let mut rows = Vec::new();
    let mut keepers = 0;
    for (r, line) in level.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut row = Vec::new();
        for (c, ch) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let cell = match ch {
                ' ' | '-' | '_' => Cell::Floor,
                '#' => Cell::Wall,
                '$' => Cell::Box,
                '@' => Cell::Keeper,
                '.' => Cell::Goal,
                '*' => Cell::BoxOnGoal,
                '+' => Cell::KeeperOnGoal,
                _ => return Err(ParserErr::InvalidCell(r, c)),
            };
            if cell.has_keeper() {
                keepers += 1;
            }
            row.push(cell);
        }
        rows.push(row);
    }

    if rows.is_empty() || rows.iter().all(Vec::is_empty) {
        return Err(ParserErr::Empty);
    }
    match keepers {
        0 => return Err(ParserErr::NoKeeper),
        1 => {}
        _ => return Err(ParserErr::MultipleKeepers),
    }

    Ok(GridState::new(Vec2d::from_rows(&rows, Cell::Floor)))
}
