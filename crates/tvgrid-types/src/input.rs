//! Remote-control input types.
//!
//! Every front end maps its native input (IR remote, keyboard, stdin) to
//! these enums. The launcher core never sees raw platform input.

use serde::{Deserialize, Serialize};

/// The four navigation directions of a TV remote d-pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in `up, down, left, right` order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Buttons a TV remote provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// OK / center / enter.
    Confirm,
    /// Long-press on OK, or the dedicated menu key.
    Menu,
    Back,
}

impl Button {
    /// The navigation direction for d-pad buttons, `None` otherwise.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Button::Up => Some(Direction::Up),
            Button::Down => Some(Direction::Down),
            Button::Left => Some(Direction::Left),
            Button::Right => Some(Direction::Right),
            Button::Confirm | Button::Menu | Button::Back => None,
        }
    }
}

impl From<Direction> for Button {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => Button::Up,
            Direction::Down => Button::Down,
            Direction::Left => Button::Left,
            Direction::Right => Button::Right,
        }
    }
}
