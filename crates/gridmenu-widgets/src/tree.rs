#![forbid(unsafe_code)]

//! Queries over a component tree.
//!
//! Origins passed around here are absolute: the panel-space cell of a
//! component's local `(0, 0)`.

use gridmenu_core::{Cell, Size};

use crate::context::Context;
use crate::{Component, ComponentKey};

/// Visit every component, parents before children, in child order.
pub fn walk(root: &dyn Component, f: &mut dyn FnMut(Cell, &dyn Component)) {
    walk_at(root, Cell::ORIGIN, f);
}

fn walk_at(node: &dyn Component, origin: Cell, f: &mut dyn FnMut(Cell, &dyn Component)) {
    f(origin, node);
    for (anchor, child) in node.children() {
        walk_at(child, anchor.offset(origin), f);
    }
}

/// First component carrying the caller-supplied `id`.
pub fn find_by_id<'a>(root: &'a dyn Component, id: &str) -> Option<&'a dyn Component> {
    if root.id() == Some(id) {
        return Some(root);
    }
    root.children()
        .into_iter()
        .find_map(|(_, child)| find_by_id(child, id))
}

/// First component carrying the caller-supplied `id`, mutably.
pub fn find_by_id_mut<'a>(root: &'a mut dyn Component, id: &str) -> Option<&'a mut dyn Component> {
    if root.id() == Some(id) {
        return Some(root);
    }
    for (_, child) in root.children_mut() {
        if let Some(found) = find_by_id_mut(child, id) {
            return Some(found);
        }
    }
    None
}

/// A component by key together with its absolute origin.
///
/// Hidden subtrees are skipped: a hidden component, or one under a hidden
/// container, is not reachable.
pub fn find_visible_mut(
    root: &mut dyn Component,
    key: ComponentKey,
) -> Option<(&mut dyn Component, Cell)> {
    find_visible_at(root, key, Cell::ORIGIN)
}

fn find_visible_at(
    node: &mut dyn Component,
    key: ComponentKey,
    origin: Cell,
) -> Option<(&mut dyn Component, Cell)> {
    if !node.is_visible() {
        return None;
    }
    if node.key() == key {
        return Some((node, origin));
    }
    for (anchor, child) in node.children_mut() {
        if let Some(found) = find_visible_at(child, key, anchor.offset(origin)) {
            return Some(found);
        }
    }
    None
}

/// Refresh intervals declared by visible components, in tree order.
pub fn refresh_declarations(root: &dyn Component) -> Vec<(ComponentKey, u32)> {
    let mut out = Vec::new();
    collect_declarations(root, &mut out);
    out
}

fn collect_declarations(node: &dyn Component, out: &mut Vec<(ComponentKey, u32)>) {
    if !node.is_visible() {
        return;
    }
    if let Some(interval) = node.refresh_interval() {
        out.push((node.key(), interval));
    }
    for (_, child) in node.children() {
        collect_declarations(child, out);
    }
}

/// The leaf a click reaches, with its absolute footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTarget {
    /// The receiving leaf.
    pub key: ComponentKey,
    /// Absolute cell of the leaf's local origin.
    pub origin: Cell,
    /// Footprint of the leaf.
    pub size: Size,
}

impl ClickTarget {
    /// Absolute cells covered by the leaf.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let origin = self.origin;
        self.size.cells().map(move |cell| cell.offset(origin))
    }
}

/// The leaf a click on `cell` would reach, following the same rules as
/// container routing. `None` means the click is swallowed.
///
/// `cell` is local to `root`, whose origin is the context origin.
pub fn click_target(root: &dyn Component, cell: Cell, ctx: &Context<'_>) -> Option<ClickTarget> {
    if !root.is_interactable() || !root.size().contains(cell) {
        return None;
    }
    if !root.is_container() {
        return Some(ClickTarget {
            key: root.key(),
            origin: ctx.origin(),
            size: root.size(),
        });
    }
    let (anchor, child) = root.hit(cell, ctx)?;
    let local = cell.relative_to(anchor)?;
    ctx.shifted(anchor, |ctx| click_target(child, local, ctx))
}

/// Number of components in the tree.
pub fn count(root: &dyn Component) -> usize {
    let mut n = 0;
    walk(root, &mut |_, _| n += 1);
    n
}
