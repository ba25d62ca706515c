#![forbid(unsafe_code)]

//! Per-render and per-click context.
//!
//! A [`Context`] bundles the panel identity, the acting user, the panel's
//! navigation link, the current tick, and the [`Surface`] that cell writes go
//! to. Containers shift the context origin while forwarding to a child, so
//! every component writes in its own local cell space.
//!
//! Navigation (`open`, `back`, `reopen`, `close`) and full re-render requests
//! are queued as [`Request`]s and applied by the owner of the panel after the
//! current handler returns.

use std::fmt;

use gridmenu_core::{ActorId, Cell, Content, Cue, Size, Slot};

use crate::Component;

/// Identity of a live panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    /// Wrap a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Destination for cell writes, addressed by absolute slot.
pub trait Surface {
    /// Replace the content of a slot (`None` clears it).
    fn set(&mut self, slot: Slot, content: Option<Content>);

    /// Current content of a slot.
    fn get(&self, slot: Slot) -> Option<Content>;
}

/// Work queued by a handler for the panel owner.
pub enum Request {
    /// Open a new panel whose previous panel is the current one.
    Open {
        /// Title of the new panel.
        title: String,
        /// Root component of the new panel.
        root: Box<dyn Component>,
    },
    /// Reopen the previous panel.
    Back,
    /// Reopen a specific live panel.
    Reopen(PanelId),
    /// Close the current panel.
    Close,
    /// Re-render every cell of the current panel.
    RenderAll,
    /// Play a feedback cue for the acting user.
    Cue(Cue),
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { title, root } => f
                .debug_struct("Open")
                .field("title", title)
                .field("root", &root.key())
                .finish(),
            Self::Back => f.write_str("Back"),
            Self::Reopen(id) => f.debug_tuple("Reopen").field(id).finish(),
            Self::Close => f.write_str("Close"),
            Self::RenderAll => f.write_str("RenderAll"),
            Self::Cue(cue) => f.debug_tuple("Cue").field(cue).finish(),
        }
    }
}

/// The per-render / per-click bundle handed to components.
pub struct Context<'a> {
    panel: PanelId,
    previous: Option<PanelId>,
    actor: &'a ActorId,
    size: Size,
    origin: std::cell::Cell<Cell>,
    tick: u64,
    surface: &'a mut dyn Surface,
    requests: &'a mut Vec<Request>,
}

impl<'a> Context<'a> {
    /// Create a context rooted at the panel's top-left cell.
    pub fn new(
        panel: PanelId,
        previous: Option<PanelId>,
        actor: &'a ActorId,
        size: Size,
        tick: u64,
        surface: &'a mut dyn Surface,
        requests: &'a mut Vec<Request>,
    ) -> Self {
        Self {
            panel,
            previous,
            actor,
            size,
            origin: std::cell::Cell::new(Cell::ORIGIN),
            tick,
            surface,
            requests,
        }
    }

    /// The panel being rendered or clicked.
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    /// The panel that opened this one, if any.
    pub fn previous_panel(&self) -> Option<PanelId> {
        self.previous
    }

    /// The acting user.
    pub fn actor(&self) -> &ActorId {
        self.actor
    }

    /// Size of the whole panel.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Absolute cell of the current component's local origin.
    pub fn origin(&self) -> Cell {
        self.origin.get()
    }

    /// Current scheduler tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Absolute slot of a local cell, or `None` when it falls outside the
    /// panel.
    pub fn slot_of(&self, cell: Cell) -> Option<Slot> {
        self.size.slot_of(cell.offset(self.origin.get()))
    }

    /// Write a local cell. Cells outside the panel are ignored.
    pub fn put(&mut self, cell: Cell, content: Option<Content>) {
        if let Some(slot) = self.slot_of(cell) {
            self.surface.set(slot, content);
        }
    }

    /// Write an absolute slot. Slots outside the panel are ignored.
    pub fn put_slot(&mut self, slot: Slot, content: Option<Content>) {
        if slot < self.size.capacity() {
            self.surface.set(slot, content);
        }
    }

    /// Current content of a local cell.
    pub fn content_at(&self, cell: Cell) -> Option<Content> {
        self.slot_of(cell).and_then(|slot| self.surface.get(slot))
    }

    /// Run `f` with the origin moved to a child anchored at `anchor`.
    pub fn nested<R>(&mut self, anchor: Cell, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.origin.get();
        self.origin.set(saved.offset(anchor));
        let result = f(self);
        self.origin.set(saved);
        result
    }

    /// Read-only counterpart of [`Self::nested`], for `items`, `slots` and
    /// hit tests that walk into children.
    pub fn shifted<R>(&self, anchor: Cell, f: impl FnOnce(&Self) -> R) -> R {
        let saved = self.origin.get();
        self.origin.set(saved.offset(anchor));
        let result = f(self);
        self.origin.set(saved);
        result
    }

    /// Open a new panel chained after this one.
    pub fn open(&mut self, title: impl Into<String>, root: impl Component) {
        self.open_boxed(title, Box::new(root));
    }

    /// Open a new panel from an already boxed root.
    pub fn open_boxed(&mut self, title: impl Into<String>, root: Box<dyn Component>) {
        self.requests.push(Request::Open {
            title: title.into(),
            root,
        });
    }

    /// Return to the previous panel. Returns `false` (and queues nothing) at
    /// the root of a navigation chain.
    pub fn back(&mut self) -> bool {
        if self.previous.is_none() {
            return false;
        }
        self.requests.push(Request::Back);
        true
    }

    /// Reopen a specific live panel.
    pub fn reopen(&mut self, panel: PanelId) {
        self.requests.push(Request::Reopen(panel));
    }

    /// Close this panel.
    pub fn close(&mut self) {
        self.requests.push(Request::Close);
    }

    /// Re-render the whole panel once the handler returns.
    pub fn render_all(&mut self) {
        self.requests.push(Request::RenderAll);
    }

    /// Play a feedback cue for the acting user.
    pub fn play_cue(&mut self, cue: Cue) {
        self.requests.push(Request::Cue(cue));
    }

    /// Requests queued so far.
    pub fn requests(&self) -> &[Request] {
        self.requests
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("panel", &self.panel)
            .field("previous", &self.previous)
            .field("actor", &self.actor)
            .field("origin", &self.origin.get())
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn size() -> Size {
        Size::new(9, 3).unwrap()
    }

    #[test]
    fn put_translates_through_nested_origin() {
        let actor = ActorId::new("alex");
        let mut canvas = Canvas::new(size());
        let mut requests = Vec::new();
        let mut ctx = Context::new(
            PanelId::from_raw(1),
            None,
            &actor,
            size(),
            0,
            &mut canvas,
            &mut requests,
        );
        ctx.nested(Cell::new(3, 1), |ctx| {
            ctx.put(Cell::new(1, 1), Some(Content::new("gold")));
            assert_eq!(ctx.slot_of(Cell::ORIGIN), Some(12));
        });
        assert_eq!(ctx.origin(), Cell::ORIGIN);
        assert_eq!(ctx.content_at(Cell::new(4, 2)), Some(Content::new("gold")));
        drop(ctx);
        assert_eq!(canvas.cell(22), Some(&Content::new("gold")));
    }

    #[test]
    fn shifted_view_restores_origin() {
        let actor = ActorId::new("alex");
        let mut canvas = Canvas::new(size());
        canvas.set(13, Some(Content::new("iron")));
        let mut requests = Vec::new();
        let ctx = Context::new(
            PanelId::from_raw(1),
            None,
            &actor,
            size(),
            0,
            &mut canvas,
            &mut requests,
        );
        let seen = ctx.shifted(Cell::new(2, 1), |ctx| {
            let inner = ctx.shifted(Cell::new(2, 0), |ctx| ctx.origin());
            (ctx.origin(), inner, ctx.slot_of(Cell::ORIGIN), ctx.content_at(Cell::new(2, 0)))
        });
        assert_eq!(
            seen,
            (Cell::new(2, 1), Cell::new(4, 1), Some(11), Some(Content::new("iron")))
        );
        assert_eq!(ctx.origin(), Cell::ORIGIN);
    }

    #[test]
    fn writes_outside_panel_are_dropped() {
        let actor = ActorId::new("alex");
        let mut canvas = Canvas::new(size());
        let mut requests = Vec::new();
        let mut ctx = Context::new(
            PanelId::from_raw(1),
            None,
            &actor,
            size(),
            0,
            &mut canvas,
            &mut requests,
        );
        ctx.put(Cell::new(9, 0), Some(Content::new("x")));
        ctx.put_slot(27, Some(Content::new("x")));
        drop(ctx);
        assert_eq!(canvas.write_count(), 0);
    }

    #[test]
    fn back_requires_previous_panel() {
        let actor = ActorId::new("alex");
        let mut canvas = Canvas::new(size());
        let mut requests = Vec::new();
        let mut ctx = Context::new(
            PanelId::from_raw(2),
            None,
            &actor,
            size(),
            0,
            &mut canvas,
            &mut requests,
        );
        assert!(!ctx.back());
        assert!(ctx.requests().is_empty());

        let mut ctx = Context::new(
            PanelId::from_raw(2),
            Some(PanelId::from_raw(1)),
            &actor,
            size(),
            0,
            &mut canvas,
            &mut requests,
        );
        assert!(ctx.back());
        ctx.play_cue(Cue::click());
        assert!(matches!(ctx.requests(), [Request::Back, Request::Cue(_)]));
    }
}
