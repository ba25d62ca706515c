#![forbid(unsafe_code)]

//! Grid geometry.
//!
//! Hosts expose a fixed-size grid of cells addressed either by a `(x, y)`
//! [`Cell`] or by a row-major [`Slot`] index. Components work in their own
//! local cell space (origin at their top-left) and containers translate
//! between spaces by offsetting with the child's anchor.

use std::cmp::Ordering;

use crate::error::{Error, Result};

/// Row-major index of a cell in a host grid (`y * width + x`).
pub type Slot = usize;

/// A cell position in grid units (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Cell {
    /// The top-left cell.
    pub const ORIGIN: Cell = Cell::new(0, 0);

    /// Create a new cell position.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Translate this cell by `anchor` (local space to parent space).
    #[inline]
    pub const fn offset(self, anchor: Cell) -> Cell {
        Cell::new(self.x.saturating_add(anchor.x), self.y.saturating_add(anchor.y))
    }

    /// Express this cell relative to `anchor` (parent space to local space).
    ///
    /// Returns `None` when the cell lies above or to the left of the anchor.
    #[inline]
    pub fn relative_to(self, anchor: Cell) -> Option<Cell> {
        Some(Cell::new(
            self.x.checked_sub(anchor.x)?,
            self.y.checked_sub(anchor.y)?,
        ))
    }
}

/// Cells order row-major: top row first, then left to right.
impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Width and height in cells. Both are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    width: u16,
    height: u16,
}

impl Size {
    /// A single cell.
    pub const ONE: Size = Size {
        width: 1,
        height: 1,
    };

    /// Create a size, rejecting zero dimensions.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in cells (the row width when used as a grid size).
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells (the row count when used as a grid size).
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of cells covered.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if a local cell is inside this size.
    #[inline]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Check whether a rectangle of `size` anchored at `anchor` fits entirely inside.
    #[inline]
    pub const fn fits(&self, anchor: Cell, size: Size) -> bool {
        anchor.x as u32 + size.width as u32 <= self.width as u32
            && anchor.y as u32 + size.height as u32 <= self.height as u32
    }

    /// Convert a cell to its slot index, or `None` when outside.
    #[inline]
    pub fn slot_of(&self, cell: Cell) -> Option<Slot> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Convert a slot index to its cell, or `None` when outside.
    #[inline]
    pub fn cell_of(&self, slot: Slot) -> Option<Cell> {
        if slot >= self.capacity() {
            return None;
        }
        let width = self.width as usize;
        Some(Cell::new((slot % width) as u16, (slot / width) as u16))
    }

    /// Iterate every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ONE
    }
}

/// Fill direction for directional widgets such as progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Fill from the right edge towards the left.
    Left,
    /// Fill from the left edge towards the right.
    #[default]
    Right,
    /// Fill from the bottom edge upwards.
    Up,
    /// Fill from the top edge downwards.
    Down,
}

impl Direction {
    /// Whether the fill runs along a row.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Number of cells along the fill axis for a given size.
    #[inline]
    pub const fn length(self, size: Size) -> u16 {
        if self.is_horizontal() {
            size.width
        } else {
            size.height
        }
    }

    /// Position of `cell` along the fill axis, 0 being the first cell filled.
    ///
    /// Cells past the far edge clamp to 0 for `Left` and `Up`.
    #[inline]
    pub const fn step(self, size: Size, cell: Cell) -> u16 {
        match self {
            Self::Right => cell.x,
            Self::Left => size.width.saturating_sub(1).saturating_sub(cell.x),
            Self::Down => cell.y,
            Self::Up => size.height.saturating_sub(1).saturating_sub(cell.y),
        }
    }
}
