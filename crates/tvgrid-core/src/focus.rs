//! Directional focus graph for pointer-less navigation.
//!
//! Every slot gets an explicit up/down/left/right target. Left and right
//! wrap across rows, so following `right` from slot 0 walks the grid in
//! reading order. The two peripheral controls close the ring:
//!
//! ```text
//! AllApps -> 0 -> 1 -> ... -> last -> Settings -> AllApps
//! ```
//!
//! Edges that leave the grid upwards or to the left land on `AllApps`;
//! edges that leave downwards or to the right land on `Settings`.

use crate::config::{MAX_COLUMNS, MAX_ROWS, MIN_COLUMNS, MIN_ROWS};
use crate::input::Direction;

/// Non-grid controls woven into the focus graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peripheral {
    /// Opens the full application list (top / left exit).
    AllApps,
    /// Opens the settings screen (bottom / right exit).
    Settings,
}

impl Peripheral {
    /// The control reached when leaving the grid in `dir`.
    pub fn exit_for(dir: Direction) -> Peripheral {
        match dir {
            Direction::Up | Direction::Left => Peripheral::AllApps,
            Direction::Down | Direction::Right => Peripheral::Settings,
        }
    }
}

/// Something that can hold focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Slot(usize),
    Control(Peripheral),
}

/// Outgoing edges of one focusable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusLink {
    pub up: FocusTarget,
    pub down: FocusTarget,
    pub left: FocusTarget,
    pub right: FocusTarget,
}

impl FocusLink {
    pub fn get(&self, dir: Direction) -> FocusTarget {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Focus edges for a `rows x columns` grid plus its peripheral controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusGraph {
    rows: usize,
    columns: usize,
    links: Vec<FocusLink>,
}

impl FocusGraph {
    /// Compute the graph. Dimensions are clamped the same way
    /// [`GridConfig::clamped`](crate::config::GridConfig::clamped) clamps them.
    pub fn compute(rows: usize, columns: usize) -> Self {
        let rows = rows.clamp(MIN_ROWS, MAX_ROWS);
        let columns = columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
        let slot = |row: usize, col: usize| FocusTarget::Slot(row * columns + col);
        let exit = |dir| FocusTarget::Control(Peripheral::exit_for(dir));

        let mut links = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                let up = if row > 0 {
                    slot(row - 1, col)
                } else {
                    exit(Direction::Up)
                };
                let down = if row + 1 < rows {
                    slot(row + 1, col)
                } else {
                    exit(Direction::Down)
                };
                let left = if col > 0 {
                    slot(row, col - 1)
                } else if row > 0 {
                    slot(row - 1, columns - 1)
                } else {
                    exit(Direction::Left)
                };
                let right = if col + 1 < columns {
                    slot(row, col + 1)
                } else if row + 1 < rows {
                    slot(row + 1, 0)
                } else {
                    exit(Direction::Right)
                };
                links.push(FocusLink {
                    up,
                    down,
                    left,
                    right,
                });
            }
        }

        Self {
            rows,
            columns,
            links,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn slot_count(&self) -> usize {
        self.links.len()
    }

    /// Links for every slot, indexed by position.
    pub fn links(&self) -> &[FocusLink] {
        &self.links
    }

    pub fn link(&self, position: usize) -> Option<&FocusLink> {
        self.links.get(position)
    }

    /// Links of a peripheral control back into the grid.
    pub fn control_link(&self, control: Peripheral) -> FocusLink {
        let first = FocusTarget::Slot(0);
        let last = FocusTarget::Slot(self.links.len() - 1);
        match control {
            Peripheral::AllApps => FocusLink {
                up: FocusTarget::Control(Peripheral::Settings),
                down: first,
                left: FocusTarget::Control(Peripheral::Settings),
                right: first,
            },
            Peripheral::Settings => FocusLink {
                up: last,
                down: FocusTarget::Control(Peripheral::AllApps),
                left: last,
                right: FocusTarget::Control(Peripheral::AllApps),
            },
        }
    }

    /// Follow one edge. Unknown slots stay where they are.
    pub fn next(&self, from: FocusTarget, dir: Direction) -> FocusTarget {
        match from {
            FocusTarget::Slot(p) => self.link(p).map_or(from, |l| l.get(dir)),
            FocusTarget::Control(c) => self.control_link(c).get(dir),
        }
    }
}
