#![forbid(unsafe_code)]

//! Grid container.
//!
//! Children are anchored at a slot of the grid (interpreted against the
//! grid's own width) and report their cells in local space. The grid
//! translates them with `absolute = anchor + local`.
//!
//! Overlaps are allowed: when two children claim the same cell the one added
//! later wins, both for rendering and for click routing. Clicks on cells no
//! visible child owns, or whose owner is not interactable, are swallowed.

use std::any::Any;

use gridmenu_core::{Cell, ClickEvent, Error, Result, Size, Slot};

use crate::context::Context;
use crate::{checked_size, Component, ComponentBase, Items, Slots};

struct GridChild {
    anchor: Cell,
    component: Box<dyn Component>,
}

/// A fixed-size container of anchored children.
pub struct Grid {
    base: ComponentBase,
    size: Size,
    children: Vec<GridChild>,
}

/// Configuration for a [`Grid`].
#[derive(Default)]
pub struct GridBuilder {
    id: Option<String>,
    size: Option<(u16, u16)>,
    children: Vec<(Slot, Box<dyn Component>)>,
}

impl GridBuilder {
    /// Caller-supplied identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Width and height in cells.
    #[must_use]
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Anchor a child at `slot`. Bounds are checked by [`build`](Self::build).
    #[must_use]
    pub fn child(mut self, slot: Slot, child: impl Component) -> Self {
        self.children.push((slot, Box::new(child)));
        self
    }

    /// Anchor an already boxed child at `slot`.
    #[must_use]
    pub fn child_boxed(mut self, slot: Slot, child: Box<dyn Component>) -> Self {
        self.children.push((slot, child));
        self
    }

    /// Validate and build, adding children in order.
    pub fn build(self) -> Result<Grid> {
        let mut grid = Grid::with_id(checked_size(self.size)?, self.id);
        for (slot, child) in self.children {
            grid.add_boxed(slot, child)?;
        }
        Ok(grid)
    }
}

impl Grid {
    /// Start configuring a grid.
    pub fn builder() -> GridBuilder {
        GridBuilder::default()
    }

    /// An empty grid.
    pub fn new(size: Size) -> Self {
        Self::with_id(size, None)
    }

    fn with_id(size: Size, id: Option<String>) -> Self {
        Self {
            base: ComponentBase::new(id),
            size,
            children: Vec::new(),
        }
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the grid has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn anchor_of(&self, slot: Slot) -> Result<Cell> {
        self.size.cell_of(slot).ok_or(Error::SlotOutOfBounds {
            slot,
            capacity: self.size.capacity(),
        })
    }

    /// Anchor a child at `slot`.
    ///
    /// The child's whole rectangle must fit inside the grid. A child already
    /// anchored at `slot` is replaced, and the new one counts as the most
    /// recently added.
    pub fn add(&mut self, slot: Slot, child: impl Component) -> Result<()> {
        self.add_boxed(slot, Box::new(child))
    }

    /// Anchor an already boxed child at `slot`.
    pub fn add_boxed(&mut self, slot: Slot, mut child: Box<dyn Component>) -> Result<()> {
        let anchor = self.anchor_of(slot)?;
        if !self.size.fits(anchor, child.size()) {
            return Err(Error::OutOfBounds {
                anchor,
                child: child.size(),
                grid: self.size,
            });
        }
        child.set_position(anchor);
        self.children.retain(|existing| existing.anchor != anchor);
        self.children.push(GridChild {
            anchor,
            component: child,
        });
        Ok(())
    }

    /// Add a child to a live grid: attach it and render its cells.
    pub fn insert(
        &mut self,
        slot: Slot,
        child: Box<dyn Component>,
        ctx: &mut Context<'_>,
    ) -> Result<()> {
        if let Ok(anchor) = self.anchor_of(slot) {
            if self.children.iter().any(|c| c.anchor == anchor) {
                self.remove(slot, ctx);
            }
        }
        self.add_boxed(slot, child)?;
        if let Some(added) = self.children.last_mut() {
            let anchor = added.anchor;
            let component = &mut added.component;
            ctx.nested(anchor, |ctx| {
                component.on_attach(ctx);
                component.render(ctx);
            });
        }
        Ok(())
    }

    /// Detach the child anchored at `slot` from a live grid.
    ///
    /// Its cells are cleared and repainted from the remaining children.
    pub fn remove(&mut self, slot: Slot, ctx: &mut Context<'_>) -> Option<Box<dyn Component>> {
        let anchor = self.anchor_of(slot).ok()?;
        let index = self.children.iter().position(|c| c.anchor == anchor)?;
        let GridChild { mut component, .. } = self.children.remove(index);

        ctx.nested(anchor, |ctx| {
            let vacated: Slots = component.slots(ctx);
            component.on_detach(ctx);
            for cell in vacated {
                ctx.put(cell, None);
            }
        });
        self.render(ctx);
        Some(component)
    }

    /// Child anchored at `slot`.
    pub fn child_at_slot(&self, slot: Slot) -> Option<&dyn Component> {
        let anchor = self.size.cell_of(slot)?;
        self.children
            .iter()
            .find(|c| c.anchor == anchor)
            .map(|c| c.component.as_ref())
    }

    /// Index of the most recently added visible child owning `cell`.
    fn owner(&self, cell: Cell, ctx: &Context<'_>) -> Option<usize> {
        if !self.size.contains(cell) {
            return None;
        }
        self.children.iter().rposition(|child| {
            child.component.is_visible()
                && cell.relative_to(child.anchor).is_some_and(|local| {
                    ctx.shifted(child.anchor, |ctx| child.component.slots(ctx))
                        .contains(&local)
                })
        })
    }
}

impl Component for Grid {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn size(&self) -> Size {
        self.size
    }

    fn items(&self, ctx: &Context<'_>) -> Items {
        let mut merged = Items::new();
        if !self.is_visible() {
            return merged;
        }
        for child in &self.children {
            if !child.component.is_visible() {
                continue;
            }
            let (items, slots) = ctx.shifted(child.anchor, |ctx| {
                (child.component.items(ctx), child.component.slots(ctx))
            });
            for local in slots {
                let cell = local.offset(child.anchor);
                if !self.size.contains(cell) {
                    continue;
                }
                match items.get(&local) {
                    Some(content) => merged.insert(cell, content.clone()),
                    None => merged.remove(&cell),
                };
            }
        }
        merged
    }

    fn slots(&self, ctx: &Context<'_>) -> Slots {
        if !self.is_visible() {
            return Slots::new();
        }
        self.children
            .iter()
            .filter(|child| child.component.is_visible())
            .flat_map(|child| {
                let anchor = child.anchor;
                ctx.shifted(anchor, |ctx| child.component.slots(ctx))
                    .into_iter()
                    .map(move |local| local.offset(anchor))
            })
            .filter(|cell| self.size.contains(*cell))
            .collect()
    }

    fn on_click(&mut self, event: &ClickEvent, ctx: &mut Context<'_>) {
        if !self.is_interactable() {
            gridmenu_core::trace!(slot = event.slot, "click swallowed by inactive grid");
            return;
        }
        let Some(index) = self.owner(event.cell, ctx) else {
            gridmenu_core::trace!(slot = event.slot, "click on unowned cell");
            return;
        };
        let child = &mut self.children[index];
        if !child.component.is_interactable() {
            gridmenu_core::trace!(slot = event.slot, "click on disabled component");
            return;
        }
        let Some(local) = event.localized(child.anchor) else {
            return;
        };
        let component = &mut child.component;
        ctx.nested(child.anchor, |ctx| component.on_click(&local, ctx));
    }

    fn on_attach(&mut self, ctx: &mut Context<'_>) {
        for child in &mut self.children {
            let component = &mut child.component;
            ctx.nested(child.anchor, |ctx| component.on_attach(ctx));
        }
    }

    fn on_detach(&mut self, ctx: &mut Context<'_>) {
        for child in &mut self.children {
            let component = &mut child.component;
            ctx.nested(child.anchor, |ctx| component.on_detach(ctx));
        }
    }

    fn children(&self) -> Vec<(Cell, &dyn Component)> {
        let mut out: Vec<(Cell, &dyn Component)> = Vec::with_capacity(self.children.len());
        for child in &self.children {
            out.push((child.anchor, child.component.as_ref()));
        }
        out
    }

    fn children_mut(&mut self) -> Vec<(Cell, &mut dyn Component)> {
        let mut out: Vec<(Cell, &mut dyn Component)> = Vec::with_capacity(self.children.len());
        for child in &mut self.children {
            out.push((child.anchor, child.component.as_mut()));
        }
        out
    }

    fn is_container(&self) -> bool {
        true
    }

    fn hit(&self, cell: Cell, ctx: &Context<'_>) -> Option<(Cell, &dyn Component)> {
        let child = &self.children[self.owner(cell, ctx)?];
        Some((child.anchor, child.component.as_ref()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let anchors: Vec<Cell> = self.children.iter().map(|c| c.anchor).collect();
        f.debug_struct("Grid")
            .field("base", &self.base)
            .field("size", &self.size)
            .field("children", &anchors)
            .finish()
    }
}

impl std::fmt::Debug for GridBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridBuilder")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("children", &self.children.len())
            .finish()
    }
}
