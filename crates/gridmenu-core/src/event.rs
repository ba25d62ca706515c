#![forbid(unsafe_code)]

//! Canonical click events.
//!
//! The host bridge normalizes its native click notification into a
//! [`ClickEvent`]. The event keeps the absolute host slot for the whole trip
//! through the component tree while `cell` is rewritten into the local space
//! of each component it is forwarded to.
//!
//! # Design Notes
//!
//! - The secondary action of a cell is a drop (`Drop` / `ControlDrop`).
//! - `NumberKey` carries the hotbar key (0-based) the user pressed.

use std::fmt;
use std::sync::Arc;

use crate::geometry::{Cell, Slot};

/// Identity of the user or session acting on a panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(Arc<str>);

impl ActorId {
    /// Create an actor identity.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How a cell was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickKind {
    /// Plain primary click.
    #[default]
    Left,
    /// Primary click with shift held.
    ShiftLeft,
    /// Plain secondary-button click.
    Right,
    /// Secondary-button click with shift held.
    ShiftRight,
    /// Middle-button click.
    Middle,
    /// Two primary clicks in quick succession.
    DoubleClick,
    /// Drop key pressed over the cell.
    Drop,
    /// Drop key pressed with control held.
    ControlDrop,
    /// Number key pressed over the cell (0-based key index).
    NumberKey(u8),
    /// Offhand swap key pressed over the cell.
    SwapOffhand,
    /// Any click the host cannot classify.
    Other,
}

impl ClickKind {
    /// Primary-button click, with or without shift.
    #[inline]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::Left | Self::ShiftLeft)
    }

    /// Secondary-button click, with or without shift.
    #[inline]
    pub const fn is_right(self) -> bool {
        matches!(self, Self::Right | Self::ShiftRight)
    }

    /// Shift was held.
    #[inline]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }

    /// The secondary action of a cell (a drop).
    #[inline]
    pub const fn is_secondary(self) -> bool {
        matches!(self, Self::Drop | Self::ControlDrop)
    }
}

/// A click delivered to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Absolute slot in the host grid.
    pub slot: Slot,
    /// Position relative to the component currently handling the event.
    pub cell: Cell,
    /// Click kind.
    pub kind: ClickKind,
    /// Who clicked.
    pub actor: ActorId,
}

impl ClickEvent {
    /// Create an event for an absolute slot. `cell` starts at the origin
    /// until the receiving panel resolves it.
    pub fn new(slot: Slot, kind: ClickKind, actor: ActorId) -> Self {
        Self {
            slot,
            cell: Cell::ORIGIN,
            kind,
            actor,
        }
    }

    /// Same event positioned at `cell`.
    #[must_use]
    pub fn at(&self, cell: Cell) -> Self {
        Self {
            cell,
            ..self.clone()
        }
    }

    /// Same event expressed in the local space of a child anchored at `anchor`.
    pub fn localized(&self, anchor: Cell) -> Option<Self> {
        self.cell.relative_to(anchor).map(|cell| self.at(cell))
    }
}
