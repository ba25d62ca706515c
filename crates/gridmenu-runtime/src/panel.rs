#![forbid(unsafe_code)]

//! A live panel: one root component shown to one user.
//!
//! The panel owns its root and knows its place in the user's navigation
//! chain. While shown it is bound to a host grid; while suspended (another
//! panel of the chain is on screen) it keeps its component state but has no
//! grid and receives no refreshes.

use gridmenu_core::{ActorId, Cell, ClickEvent, Size};
use gridmenu_widgets::{
    Component, ComponentKey, Context, Discard, PanelId, Request, Surface, tree,
};

use crate::host::GridId;

/// A root component plus its navigation and host binding.
pub struct Panel {
    id: PanelId,
    actor: ActorId,
    title: String,
    root: Box<dyn Component>,
    previous: Option<PanelId>,
    grid: Option<GridId>,
    attached: bool,
}

impl Panel {
    pub(crate) fn new(
        id: PanelId,
        actor: ActorId,
        title: String,
        root: Box<dyn Component>,
        previous: Option<PanelId>,
    ) -> Self {
        Self {
            id,
            actor,
            title,
            root,
            previous,
            grid: None,
            attached: false,
        }
    }

    /// Panel identity.
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// User the panel is shown to.
    pub fn actor(&self) -> &ActorId {
        &self.actor
    }

    /// Title given at open.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The panel that opened this one.
    pub fn previous_panel(&self) -> Option<PanelId> {
        self.previous
    }

    /// Host grid while shown.
    pub fn grid(&self) -> Option<GridId> {
        self.grid
    }

    pub(crate) fn bind(&mut self, grid: GridId) {
        self.grid = Some(grid);
    }

    pub(crate) fn unbind(&mut self) -> Option<GridId> {
        self.grid.take()
    }

    /// Whether the panel is on screen.
    pub fn is_shown(&self) -> bool {
        self.grid.is_some()
    }

    /// Whether the root received its attach notification and not yet its
    /// detach.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Size of the root component.
    pub fn size(&self) -> Size {
        self.root.size()
    }

    /// The root component.
    pub fn root(&self) -> &dyn Component {
        self.root.as_ref()
    }

    /// The root component, mutably. Call [`crate::Runtime::render`] after
    /// changing what it shows.
    pub fn root_mut(&mut self) -> &mut dyn Component {
        self.root.as_mut()
    }

    /// First component in the tree with the given id.
    pub fn find(&self, id: &str) -> Option<&dyn Component> {
        tree::find_by_id(self.root.as_ref(), id)
    }

    /// First component in the tree with the given id, mutably.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut dyn Component> {
        tree::find_by_id_mut(self.root.as_mut(), id)
    }

    /// Typed lookup by id.
    pub fn find_as<T: Component>(&self, id: &str) -> Option<&T> {
        self.find(id).and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Typed lookup by id, mutably.
    pub fn find_as_mut<T: Component>(&mut self, id: &str) -> Option<&mut T> {
        self.find_mut(id)
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Refresh intervals currently declared by visible components.
    pub fn declarations(&self) -> Vec<(ComponentKey, u32)> {
        tree::refresh_declarations(self.root.as_ref())
    }

    pub(crate) fn attach(&mut self, surface: &mut dyn Surface, tick: u64) -> Vec<Request> {
        let mut requests = Vec::new();
        if self.attached {
            return requests;
        }
        let size = self.root.size();
        let mut ctx = Context::new(
            self.id,
            self.previous,
            &self.actor,
            size,
            tick,
            surface,
            &mut requests,
        );
        self.root.on_attach(&mut ctx);
        drop(ctx);
        self.attached = true;
        requests
    }

    /// Detach notifications have no surface: the grid is already gone.
    pub(crate) fn detach(&mut self, tick: u64) {
        if !self.attached {
            return;
        }
        let mut requests = Vec::new();
        let mut surface = Discard;
        let size = self.root.size();
        let mut ctx = Context::new(
            self.id,
            self.previous,
            &self.actor,
            size,
            tick,
            &mut surface,
            &mut requests,
        );
        self.root.on_detach(&mut ctx);
        drop(ctx);
        self.attached = false;
        if !requests.is_empty() {
            tracing::trace!(
                panel = self.id.raw(),
                dropped = requests.len(),
                "requests queued during detach ignored"
            );
        }
    }

    /// Write every cell of the panel, clearing cells nothing shows.
    pub(crate) fn render(&self, surface: &mut dyn Surface, tick: u64) -> Vec<Request> {
        let mut requests = Vec::new();
        let size = self.root.size();
        let mut ctx = Context::new(
            self.id,
            self.previous,
            &self.actor,
            size,
            tick,
            surface,
            &mut requests,
        );
        let items = if self.root.is_visible() {
            self.root.items(&ctx)
        } else {
            Default::default()
        };
        for cell in size.cells() {
            ctx.put(cell, items.get(&cell).cloned());
        }
        drop(ctx);
        requests
    }

    /// Run `f` on the root with a panel-level context.
    pub(crate) fn edit<R>(
        &mut self,
        surface: &mut dyn Surface,
        tick: u64,
        f: impl FnOnce(&mut dyn Component, &mut Context<'_>) -> R,
    ) -> (R, Vec<Request>) {
        let mut requests = Vec::new();
        let size = self.root.size();
        let mut ctx = Context::new(
            self.id,
            self.previous,
            &self.actor,
            size,
            tick,
            surface,
            &mut requests,
        );
        let result = f(self.root.as_mut(), &mut ctx);
        drop(ctx);
        (result, requests)
    }

    /// Route a click on an absolute slot into the tree.
    ///
    /// The receiving leaf's cells are rewritten afterwards from the merged
    /// panel items, so a later overlapping sibling keeps its cells. Returns
    /// whether a leaf accepted the click, plus whatever the handlers queued.
    pub(crate) fn dispatch(
        &mut self,
        event: &ClickEvent,
        surface: &mut dyn Surface,
        tick: u64,
    ) -> (bool, Vec<Request>) {
        let mut requests = Vec::new();
        let size = self.root.size();
        let Some(cell) = size.cell_of(event.slot) else {
            return (false, requests);
        };
        let mut ctx = Context::new(
            self.id,
            self.previous,
            &self.actor,
            size,
            tick,
            surface,
            &mut requests,
        );
        let target = tree::click_target(self.root.as_ref(), cell, &ctx);
        self.root.on_click(&event.at(cell), &mut ctx);
        if let Some(target) = &target {
            let items = self.root.items(&ctx);
            for cell in target.cells() {
                ctx.put(cell, items.get(&cell).cloned());
            }
        }
        drop(ctx);
        (target.is_some(), requests)
    }

    /// Run one scheduled refresh of the component `key`.
    ///
    /// A dirty component gets its own cells rewritten, each with whatever the
    /// panel shows there now, so a later overlapping sibling keeps its cells.
    /// Returns `None` when `key` is no longer reachable.
    pub(crate) fn refresh(
        &mut self,
        key: ComponentKey,
        surface: &mut dyn Surface,
        tick: u64,
    ) -> Option<(bool, Vec<Request>)> {
        let mut requests = Vec::new();
        let size = self.root.size();
        let (component, origin) = tree::find_visible_mut(self.root.as_mut(), key)?;
        let mut ctx = Context::new(
            self.id,
            self.previous,
            &self.actor,
            size,
            tick,
            surface,
            &mut requests,
        );
        let cells: Vec<Cell> = ctx.nested(origin, |ctx| {
            if component.refresh(ctx) {
                component
                    .slots(ctx)
                    .into_iter()
                    .map(|cell| cell.offset(origin))
                    .collect()
            } else {
                Vec::new()
            }
        });
        let dirty = !cells.is_empty();
        if dirty {
            let items = self.root.items(&ctx);
            for cell in cells {
                ctx.put(cell, items.get(&cell).cloned());
            }
        }
        drop(ctx);
        Some((dirty, requests))
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("actor", &self.actor)
            .field("title", &self.title)
            .field("previous", &self.previous)
            .field("grid", &self.grid)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}
