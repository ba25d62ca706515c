#![forbid(unsafe_code)]

//! Headless harness for exercising components without a runtime.
//!
//! The harness owns a [`Canvas`] the size of a panel, the request queue, and
//! a tick counter. Components are driven at the panel origin, the way a
//! panel drives its root.

use gridmenu_core::{ActorId, ClickEvent, ClickKind, Content, Size, Slot};

use crate::canvas::Canvas;
use crate::context::{Context, PanelId, Request};
use crate::{tree, Component};

/// A single-panel test bench.
#[derive(Debug)]
pub struct Harness {
    /// Acting user for every context.
    pub actor: ActorId,
    /// Cells written so far.
    pub canvas: Canvas,
    /// Requests queued by handlers.
    pub requests: Vec<Request>,
    /// Tick reported by every context.
    pub tick: u64,
    /// Panel id reported by every context.
    pub panel: PanelId,
    /// Previous panel reported by every context.
    pub previous: Option<PanelId>,
}

impl Harness {
    /// A harness whose panel has the given size.
    pub fn new(size: Size) -> Self {
        Self {
            actor: ActorId::new("tester"),
            canvas: Canvas::new(size),
            requests: Vec::new(),
            tick: 0,
            panel: PanelId::from_raw(1),
            previous: None,
        }
    }

    /// A context over the harness state.
    pub fn ctx(&mut self) -> Context<'_> {
        Context::new(
            self.panel,
            self.previous,
            &self.actor,
            self.canvas.size(),
            self.tick,
            &mut self.canvas,
            &mut self.requests,
        )
    }

    /// Render a component at the panel origin.
    pub fn render(&mut self, component: &dyn Component) {
        let mut ctx = self.ctx();
        component.render(&mut ctx);
    }

    /// Attach and render a component.
    pub fn mount(&mut self, component: &mut dyn Component) {
        let mut ctx = self.ctx();
        component.on_attach(&mut ctx);
        component.render(&mut ctx);
    }

    /// Deliver a click on an absolute slot to a component at the panel origin.
    ///
    /// Like a panel, the receiving leaf's cells are then rewritten from the
    /// merged items of `component`.
    pub fn click(&mut self, component: &mut dyn Component, slot: Slot, kind: ClickKind) {
        let cell = self.canvas.size().cell_of(slot).unwrap_or_default();
        let event = ClickEvent::new(slot, kind, self.actor.clone()).at(cell);
        let mut ctx = self.ctx();
        let target = tree::click_target(component, cell, &ctx);
        component.on_click(&event, &mut ctx);
        if let Some(target) = target {
            let items = component.items(&ctx);
            for cell in target.cells() {
                ctx.put(cell, items.get(&cell).cloned());
            }
        }
    }

    /// Advance the tick counter and run one refresh; re-renders when the
    /// component asks for it. Returns the refresh result.
    pub fn refresh(&mut self, component: &mut dyn Component, ticks: u64) -> bool {
        self.tick += ticks;
        let mut ctx = self.ctx();
        let dirty = component.refresh(&ctx);
        if dirty {
            component.render(&mut ctx);
        }
        dirty
    }

    /// Content currently shown at a slot.
    pub fn at(&self, slot: Slot) -> Option<&Content> {
        self.canvas.cell(slot)
    }

    /// Kind of the content at a slot, for terse assertions.
    pub fn kind_at(&self, slot: Slot) -> Option<&str> {
        self.at(slot).map(Content::kind)
    }

    /// Drain queued requests.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }
}
