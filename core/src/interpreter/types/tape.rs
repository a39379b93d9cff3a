//! Fixed-length byte tape with a bounds-checked cursor

use super::super::errors::ExecError;
use std::fmt;

pub const DEFAULT_TAPE_LENGTH: usize = 30_000;

/// Direction of a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// The machine's memory
///
/// Cells are unsigned bytes with wrapping arithmetic. The cursor always stays
/// inside `0..len`; moves past either end fail instead of wrapping or growing.
#[derive(Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Box<[u8]>,
    cursor: usize,
}

impl Tape {
    /// Create a zeroed tape
    ///
    /// # Panics
    /// If `len` is zero.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "tape length must be at least 1");
        Self {
            cells: vec![0; len].into_boxed_slice(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Value of the cell under the cursor
    pub fn get(&self) -> u8 {
        self.cells[self.cursor]
    }

    /// Value of the cell at `index`
    pub fn cell(&self, index: usize) -> u8 {
        self.cells[index]
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn set(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    pub fn move_right(&mut self) -> Result<(), ExecError> {
        if self.cursor + 1 == self.cells.len() {
            return Err(self.out_of_bounds(Direction::Right));
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn move_left(&mut self) -> Result<(), ExecError> {
        if self.cursor == 0 {
            return Err(self.out_of_bounds(Direction::Left));
        }
        self.cursor -= 1;
        Ok(())
    }

    fn out_of_bounds(&self, direction: Direction) -> ExecError {
        ExecError::OutOfBounds {
            cursor: self.cursor,
            len: self.cells.len(),
            direction,
        }
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(DEFAULT_TAPE_LENGTH)
    }
}

// Printing 30000 cells is never useful; show the cursor and the non-zero prefix.
impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self
            .cells
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1);
        f.debug_struct("Tape")
            .field("len", &self.cells.len())
            .field("cursor", &self.cursor)
            .field("cells", &&self.cells[..used])
            .finish()
    }
}
