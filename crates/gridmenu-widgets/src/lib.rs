#![forbid(unsafe_code)]

//! Components for gridmenu.
//!
//! A [`Component`] produces content for the cells it occupies, handles clicks
//! routed to it, and may opt into periodic refreshes. Components report cells
//! in their own local space (origin at their top-left); the [`Grid`]
//! container anchors children and translates between spaces.

pub mod button;
pub mod canvas;
pub mod confirmation;
pub mod context;
pub mod double_confirm;
pub mod grid;
pub mod icon;
pub mod progress;
pub mod selector;
pub mod source;
pub mod testing;
pub mod toggle;
pub mod tree;

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use gridmenu_core::{Cell, Content, Size};

pub use button::Button;
pub use canvas::{Canvas, Discard};
pub use context::{Context, PanelId, Request, Surface};
pub use double_confirm::{ConfirmState, DoubleConfirmButton};
pub use grid::Grid;
pub use icon::Icon;
pub use progress::ProgressBar;
pub use selector::{SelectionChange, Selector};
pub use source::ContentSource;
pub use toggle::{Toggle, ToggleEvent};

/// Content keyed by local cell, ordered row-major.
pub type Items = BTreeMap<Cell, Content>;

/// Occupied local cells, ordered row-major.
pub type Slots = BTreeSet<Cell>;

/// Process-unique identity of a component instance.
///
/// Assigned at construction; used by the refresh scheduler to find a
/// component again without relying on caller-supplied ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey(u64);

impl ComponentKey {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw key value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// State shared by every component: identity, anchor, and flags.
#[derive(Debug)]
pub struct ComponentBase {
    key: ComponentKey,
    id: Option<String>,
    position: Cell,
    visible: bool,
    enabled: bool,
}

impl ComponentBase {
    /// Create a visible, enabled base anchored at the origin.
    pub fn new(id: Option<String>) -> Self {
        Self {
            key: ComponentKey::next(),
            id,
            position: Cell::ORIGIN,
            visible: true,
            enabled: true,
        }
    }

    /// Instance key.
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    /// Caller-supplied identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Anchor inside the parent.
    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move the anchor. Coordinates are unsigned, so negative positions
    /// cannot be expressed.
    pub fn set_position(&mut self, position: Cell) {
        self.position = position;
    }

    /// Visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the visibility flag.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Enabled flag.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// The unit of composition.
///
/// `items` and `slots` are pure with respect to component state. `render`
/// writes the component's own cells through the [`Context`] and does
/// nothing while the component is hidden; calling it twice with unchanged
/// state writes the same content.
pub trait Component: 'static {
    /// Shared base state.
    fn base(&self) -> &ComponentBase;

    /// Shared base state, mutably.
    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Footprint in cells.
    fn size(&self) -> Size;

    /// Content for each occupied local cell. Empty while hidden.
    fn items(&self, ctx: &Context<'_>) -> Items;

    /// Occupied local cells: the full `width * height` rectangle, or nothing
    /// while hidden.
    fn slots(&self, _ctx: &Context<'_>) -> Slots {
        if !self.is_visible() {
            return Slots::new();
        }
        self.size().cells().collect()
    }

    /// Handle a click whose `cell` is already local to this component.
    fn on_click(&mut self, _event: &gridmenu_core::ClickEvent, _ctx: &mut Context<'_>) {}

    /// Called once when the component becomes part of a live panel.
    fn on_attach(&mut self, _ctx: &mut Context<'_>) {}

    /// Called when the component leaves its panel.
    fn on_detach(&mut self, _ctx: &mut Context<'_>) {}

    /// Ticks between refreshes, when the component wants periodic updates.
    fn refresh_interval(&self) -> Option<u32> {
        None
    }

    /// Advance time-based state. Returns `true` when the cells must be
    /// re-rendered.
    fn refresh(&mut self, _ctx: &Context<'_>) -> bool {
        false
    }

    /// Direct children with their anchors.
    fn children(&self) -> Vec<(Cell, &dyn Component)> {
        Vec::new()
    }

    /// Direct children with their anchors, mutably.
    fn children_mut(&mut self) -> Vec<(Cell, &mut dyn Component)> {
        Vec::new()
    }

    /// Whether clicks are routed to children instead of handled here.
    fn is_container(&self) -> bool {
        false
    }

    /// The child that owns a local cell, with its anchor.
    fn hit(&self, _cell: Cell, _ctx: &Context<'_>) -> Option<(Cell, &dyn Component)> {
        None
    }

    /// Upcast for typed lookups.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed lookups, mutably.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Write this component's cells.
    fn render(&self, ctx: &mut Context<'_>) {
        let _span = gridmenu_core::trace_span!(
            "component_render",
            key = self.key().get(),
            x = ctx.origin().x,
            y = ctx.origin().y
        )
        .entered();

        if !self.is_visible() {
            return;
        }
        let items = self.items(ctx);
        for cell in self.slots(ctx) {
            ctx.put(cell, items.get(&cell).cloned());
        }
    }

    /// Instance key.
    fn key(&self) -> ComponentKey {
        self.base().key()
    }

    /// Caller-supplied identifier.
    fn id(&self) -> Option<&str> {
        self.base().id()
    }

    /// Anchor inside the parent.
    fn position(&self) -> Cell {
        self.base().position()
    }

    /// Move the anchor.
    fn set_position(&mut self, position: Cell) {
        self.base_mut().set_position(position);
    }

    /// Whether the component is shown.
    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    /// Show or hide the component.
    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    /// Whether the component accepts clicks when visible.
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Enable or disable the component.
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    /// Visible and enabled.
    fn is_interactable(&self) -> bool {
        self.is_visible() && self.is_enabled()
    }
}

/// Fill every cell of `size` with `content`.
pub(crate) fn fill(size: Size, content: &Content) -> Items {
    size.cells().map(|cell| (cell, content.clone())).collect()
}

/// Validate a builder's width/height pair.
pub(crate) fn checked_size(size: Option<(u16, u16)>) -> gridmenu_core::Result<Size> {
    match size {
        Some((width, height)) => Size::new(width, height),
        None => Ok(Size::ONE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn keys_are_unique() {
        let a = ComponentBase::new(None);
        let b = ComponentBase::new(None);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn base_defaults() {
        let base = ComponentBase::new(Some("close".into()));
        assert_eq!(base.id(), Some("close"));
        assert_eq!(base.position(), Cell::ORIGIN);
        assert!(base.is_visible());
        assert!(base.is_enabled());
    }

    #[test]
    fn interactable_requires_visible_and_enabled() {
        let mut icon = Icon::builder().content(Content::new("bedrock")).build().unwrap();
        assert!(icon.is_interactable());
        icon.set_enabled(false);
        assert!(!icon.is_interactable());
        icon.set_enabled(true);
        icon.set_visible(false);
        assert!(!icon.is_interactable());
    }

    #[test]
    fn hidden_component_renders_nothing() {
        let mut harness = Harness::new(Size::new(9, 1).unwrap());
        let mut icon = Icon::builder()
            .content(Content::new("bedrock"))
            .size(2, 1)
            .build()
            .unwrap();
        icon.set_visible(false);

        let ctx = harness.ctx();
        assert!(icon.slots(&ctx).is_empty());
        assert!(icon.items(&ctx).is_empty());
        drop(ctx);

        harness.render(&icon);
        assert_eq!(harness.canvas.write_count(), 0);
    }

    #[test]
    fn render_is_idempotent() {
        let mut harness = Harness::new(Size::new(9, 1).unwrap());
        let icon = Icon::builder()
            .content(Content::new("bedrock"))
            .size(3, 1)
            .build()
            .unwrap();
        harness.render(&icon);
        let first = harness.canvas.clone();
        harness.render(&icon);
        assert_eq!(harness.canvas.cells(), first.cells());
    }

    #[test]
    fn checked_size_rejects_zero() {
        assert!(checked_size(Some((0, 1))).is_err());
        assert_eq!(checked_size(None).unwrap(), Size::ONE);
    }
}
