#![forbid(unsafe_code)]

//! Precondition errors.
//!
//! Every variant is a programmer error reported synchronously by the call
//! that introduced it (a builder's `build`, `Grid::add`, runtime lookups).
//! Nothing here is produced while rendering or routing clicks.

use std::fmt;

use crate::geometry::{Cell, Size, Slot};

/// Configuration or precondition failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width or height of zero.
    InvalidSize {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Slot index beyond the grid capacity.
    SlotOutOfBounds {
        /// Offending slot.
        slot: Slot,
        /// Number of cells in the grid.
        capacity: usize,
    },
    /// A child rectangle would leave its grid.
    OutOfBounds {
        /// Anchor of the child.
        anchor: Cell,
        /// Size of the child.
        child: Size,
        /// Size of the hosting grid.
        grid: Size,
    },
    /// A required content provider was never configured.
    MissingContent(&'static str),
    /// A selector was built without options.
    EmptyOptions,
    /// A selector default index past the last option.
    OptionIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of options.
        len: usize,
    },
    /// A selector default value that matches no option.
    UnknownOption,
    /// An animated button without frames.
    NoFrames,
    /// A refresh interval or time window of zero ticks.
    InvalidInterval,
    /// A panel id that the runtime does not know.
    UnknownPanel(u64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "size must be positive, got {width}x{height}")
            }
            Self::SlotOutOfBounds { slot, capacity } => {
                write!(f, "slot {slot} is outside a grid of {capacity} cells")
            }
            Self::OutOfBounds {
                anchor,
                child,
                grid,
            } => write!(
                f,
                "{}x{} child at ({}, {}) does not fit in a {}x{} grid",
                child.width(),
                child.height(),
                anchor.x,
                anchor.y,
                grid.width(),
                grid.height()
            ),
            Self::MissingContent(what) => write!(f, "{what} is required"),
            Self::EmptyOptions => write!(f, "selector needs at least one option"),
            Self::OptionIndexOutOfRange { index, len } => {
                write!(f, "default option {index} is out of range for {len} options")
            }
            Self::UnknownOption => write!(f, "default value matches no option"),
            Self::NoFrames => write!(f, "animation needs at least one frame"),
            Self::InvalidInterval => write!(f, "interval must be at least one tick"),
            Self::UnknownPanel(id) => write!(f, "panel {id} is not registered"),
        }
    }
}

impl std::error::Error for Error {}

/// Standard result type for gridmenu APIs.
pub type Result<T> = std::result::Result<T, Error>;
