#![forbid(unsafe_code)]

//! Host grid primitive.
//!
//! The host owns fixed-size cell grids shown to users. The runtime opens one
//! grid per shown panel, writes cells into it, and receives clicks and close
//! notifications for it. [`MemoryHost`] keeps everything in memory and is what
//! tests and the demo drive.

use std::collections::BTreeMap;
use std::fmt;

use gridmenu_core::{ActorId, Content, Cue, Size, Slot};
use gridmenu_widgets::{Canvas, Surface};

/// Handle of a host grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(u64);

impl GridId {
    /// Wrap a raw handle.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid#{}", self.0)
    }
}

/// The display side of a panel.
///
/// Calls happen on the host's tick thread only; implementations need no
/// internal locking.
pub trait Host {
    /// Show a new grid to `actor`, replacing whatever they were looking at.
    fn open_grid(&mut self, actor: &ActorId, title: &str, size: Size) -> GridId;

    /// Close a grid the runtime no longer uses.
    fn close_grid(&mut self, grid: GridId);

    /// Replace the content of one cell.
    fn set_content(&mut self, grid: GridId, slot: Slot, content: Option<Content>);

    /// Current content of one cell.
    fn content(&self, grid: GridId, slot: Slot) -> Option<Content>;

    /// Play a feedback cue for `actor`.
    fn play_cue(&mut self, _actor: &ActorId, _cue: &Cue) {}
}

/// A [`Surface`] writing into one host grid.
pub struct HostSurface<'h, H: Host + ?Sized> {
    host: &'h mut H,
    grid: GridId,
}

impl<'h, H: Host + ?Sized> HostSurface<'h, H> {
    /// Bind to `grid`.
    pub fn new(host: &'h mut H, grid: GridId) -> Self {
        Self { host, grid }
    }
}

impl<H: Host + ?Sized> Surface for HostSurface<'_, H> {
    fn set(&mut self, slot: Slot, content: Option<Content>) {
        self.host.set_content(self.grid, slot, content);
    }

    fn get(&self, slot: Slot) -> Option<Content> {
        self.host.content(self.grid, slot)
    }
}

#[derive(Debug)]
struct MemoryGrid {
    actor: ActorId,
    title: String,
    canvas: Canvas,
}

/// A headless host keeping grids in memory.
///
/// Records every grid it ever opened (closed ones stay readable), the cues
/// it was asked to play, and the order of closes.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next: u64,
    grids: BTreeMap<GridId, MemoryGrid>,
    open: Vec<GridId>,
    closed: Vec<GridId>,
    cues: Vec<(ActorId, Cue)>,
}

impl MemoryHost {
    /// An empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `grid` is currently shown.
    pub fn is_open(&self, grid: GridId) -> bool {
        self.open.contains(&grid)
    }

    /// The grid `actor` is looking at, if any.
    pub fn open_grid_for(&self, actor: &ActorId) -> Option<GridId> {
        self.open
            .iter()
            .rev()
            .copied()
            .find(|grid| self.grids.get(grid).is_some_and(|g| &g.actor == actor))
    }

    /// Title a grid was opened with.
    pub fn title(&self, grid: GridId) -> Option<&str> {
        self.grids.get(&grid).map(|g| g.title.as_str())
    }

    /// Cells of a grid.
    pub fn canvas(&self, grid: GridId) -> Option<&Canvas> {
        self.grids.get(&grid).map(|g| &g.canvas)
    }

    /// Kind of the content at a cell, for terse assertions.
    pub fn kind_at(&self, grid: GridId, slot: Slot) -> Option<&str> {
        self.canvas(grid)
            .and_then(|canvas| canvas.cell(slot))
            .map(Content::kind)
    }

    /// Cell writes a grid received since it opened (or since the last reset).
    pub fn write_count(&self, grid: GridId) -> usize {
        self.canvas(grid).map_or(0, Canvas::write_count)
    }

    /// Reset the write counter of a grid.
    pub fn reset_writes(&mut self, grid: GridId) {
        if let Some(g) = self.grids.get_mut(&grid) {
            g.canvas.reset_writes();
        }
    }

    /// Every grid ever opened, oldest first.
    pub fn grids(&self) -> impl Iterator<Item = GridId> + '_ {
        self.grids.keys().copied()
    }

    /// Grids closed so far, in close order.
    pub fn closed(&self) -> &[GridId] {
        &self.closed
    }

    /// Cues played so far.
    pub fn cues(&self) -> &[(ActorId, Cue)] {
        &self.cues
    }

    /// Render a grid as text with its title on the first line.
    pub fn dump(&self, grid: GridId) -> String {
        match self.grids.get(&grid) {
            Some(g) => format!("[{}] {}\n{}", grid, g.title, g.canvas.to_text()),
            None => format!("[{grid}] <unknown>\n"),
        }
    }
}

impl Host for MemoryHost {
    fn open_grid(&mut self, actor: &ActorId, title: &str, size: Size) -> GridId {
        self.next += 1;
        let grid = GridId(self.next);
        if let Some(previous) = self.open_grid_for(actor) {
            self.close_grid(previous);
        }
        self.grids.insert(
            grid,
            MemoryGrid {
                actor: actor.clone(),
                title: title.to_owned(),
                canvas: Canvas::new(size),
            },
        );
        self.open.push(grid);
        grid
    }

    fn close_grid(&mut self, grid: GridId) {
        if let Some(index) = self.open.iter().position(|g| *g == grid) {
            self.open.remove(index);
            self.closed.push(grid);
        }
    }

    fn set_content(&mut self, grid: GridId, slot: Slot, content: Option<Content>) {
        if !self.is_open(grid) {
            return;
        }
        if let Some(g) = self.grids.get_mut(&grid) {
            g.canvas.set(slot, content);
        }
    }

    fn content(&self, grid: GridId, slot: Slot) -> Option<Content> {
        self.canvas(grid).and_then(|canvas| canvas.cell(slot)).cloned()
    }

    fn play_cue(&mut self, actor: &ActorId, cue: &Cue) {
        self.cues.push((actor.clone(), cue.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_replaces_the_actors_grid() {
        let mut host = MemoryHost::new();
        let steve = ActorId::new("steve");
        let alex = ActorId::new("alex");
        let size = Size::new(9, 1).unwrap();
        let a = host.open_grid(&steve, "A", size);
        let b = host.open_grid(&alex, "B", size);
        let c = host.open_grid(&steve, "C", size);
        assert!(!host.is_open(a));
        assert!(host.is_open(b));
        assert_eq!(host.open_grid_for(&steve), Some(c));
        assert_eq!(host.closed(), &[a]);
    }

    #[test]
    fn writes_to_closed_grids_are_ignored() {
        let mut host = MemoryHost::new();
        let actor = ActorId::new("steve");
        let grid = host.open_grid(&actor, "A", Size::new(3, 1).unwrap());
        host.set_content(grid, 1, Some(Content::new("apple")));
        host.close_grid(grid);
        host.set_content(grid, 1, None);
        assert_eq!(host.kind_at(grid, 1), Some("apple"));
        assert_eq!(host.write_count(grid), 1);
    }

    #[test]
    fn surface_routes_to_its_grid() {
        let mut host = MemoryHost::new();
        let actor = ActorId::new("steve");
        let grid = host.open_grid(&actor, "A", Size::new(3, 1).unwrap());
        let mut surface = HostSurface::new(&mut host, grid);
        surface.set(2, Some(Content::new("bread")));
        assert_eq!(surface.get(2), Some(Content::new("bread")));
        assert!(host.dump(grid).starts_with("[grid#1] A\n"));
    }
}
