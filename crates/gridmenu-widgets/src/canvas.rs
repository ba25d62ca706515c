#![forbid(unsafe_code)]

//! In-memory surfaces.

use std::fmt::Write as _;

use gridmenu_core::{Content, Size, Slot};

use crate::context::Surface;

/// A grid of cells held in memory.
///
/// Counts writes so tests can tell a partial render from a full one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    cells: Vec<Option<Content>>,
    writes: usize,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![None; size.capacity()],
            writes: 0,
        }
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Content of a slot.
    pub fn cell(&self, slot: Slot) -> Option<&Content> {
        self.cells.get(slot).and_then(Option::as_ref)
    }

    /// All cells in slot order.
    pub fn cells(&self) -> &[Option<Content>] {
        &self.cells
    }

    /// Number of `set` calls that landed inside the canvas.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Reset the write counter.
    pub fn reset_writes(&mut self) {
        self.writes = 0;
    }

    /// Render as text, one row per line.
    ///
    /// Each cell shows its content (label, else kind) padded to the widest
    /// cell; empty cells show `.`.
    pub fn to_text(&self) -> String {
        let labels: Vec<String> = self
            .cells
            .iter()
            .map(|cell| match cell {
                Some(content) => content.to_string(),
                None => ".".to_owned(),
            })
            .collect();
        let column = labels.iter().map(String::len).max().unwrap_or(1);
        let width = self.size.width() as usize;

        let mut out = String::new();
        for row in labels.chunks(width) {
            let line = row
                .iter()
                .map(|label| format!("{label:<column$}"))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }
}

impl Surface for Canvas {
    fn set(&mut self, slot: Slot, content: Option<Content>) {
        if let Some(cell) = self.cells.get_mut(slot) {
            *cell = content;
            self.writes += 1;
        }
    }

    fn get(&self, slot: Slot) -> Option<Content> {
        self.cell(slot).cloned()
    }
}

/// A surface that drops every write.
///
/// Used when a component must run a hook but its panel has nowhere to draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Surface for Discard {
    fn set(&mut self, _slot: Slot, _content: Option<Content>) {}

    fn get(&self, _slot: Slot) -> Option<Content> {
        None
    }
}
