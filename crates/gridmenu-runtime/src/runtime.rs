#![forbid(unsafe_code)]

//! The panel runtime.
//!
//! [`Runtime`] owns every live panel, binds shown panels to host grids,
//! routes host clicks into component trees, applies the navigation requests
//! handlers queue, and drives periodic refreshes from [`Runtime::tick`].
//!
//! # Navigation chains
//!
//! A panel opened from another panel remembers it as its previous panel.
//! Each user has at most one shown panel; the panels reachable from it
//! through previous links are kept alive (suspended) so `back` can return to
//! them with their state intact. Any other panel of that user is released:
//! its refreshes are cancelled and its tree gets its detach notification.
//!
//! # Failure handling
//!
//! Component code runs inside [`boundary::guard`]. A caught panic is logged
//! at `error` level, the requests the failing handler queued are discarded,
//! and the panel is re-rendered from its current state.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use gridmenu_core::{ActorId, ClickEvent, Error, Result};
use gridmenu_widgets::{Component, Context, Discard, PanelId, Request};

use crate::boundary::{self, CapturedPanic};
use crate::config::RuntimeConfig;
use crate::host::{GridId, Host, HostSurface};
use crate::panel::Panel;
use crate::scheduler::RefreshScheduler;

/// What happened to a host click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The grid is not a panel grid; the host should handle the click itself.
    Unmanaged,
    /// A component received the click.
    Handled,
    /// The click landed on a panel but no interactable component owns the
    /// cell.
    Swallowed,
    /// A handler panicked; the message is attached.
    Failed(String),
}

impl ClickOutcome {
    /// Whether the host must cancel its own default handling of the click.
    ///
    /// Every click on a panel grid is cancelled, handled or not.
    pub fn cancels_default(&self) -> bool {
        !matches!(self, Self::Unmanaged)
    }
}

/// Summary of one [`Runtime::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick that just ran.
    pub tick: u64,
    /// Refreshes invoked.
    pub fired: usize,
    /// Refreshes that asked for a re-render.
    pub rendered: usize,
    /// Refreshes that panicked.
    pub failures: Vec<(PanelId, String)>,
}

/// Owner of all live panels for one host.
pub struct Runtime<H: Host> {
    host: H,
    config: RuntimeConfig,
    panels: BTreeMap<PanelId, Panel>,
    grids: HashMap<GridId, PanelId>,
    active: HashMap<ActorId, PanelId>,
    scheduler: RefreshScheduler,
    tick: u64,
    next_panel: u64,
}

fn log_panic(panel: PanelId, stage: &'static str, panic: &CapturedPanic) {
    tracing::error!(
        panel = panel.raw(),
        stage,
        error = %panic.message,
        "component panicked"
    );
}

impl<H: Host> Runtime<H> {
    /// A runtime with default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RuntimeConfig::default())
    }

    /// A runtime with explicit configuration.
    pub fn with_config(host: H, config: RuntimeConfig) -> Self {
        Self {
            host,
            config,
            panels: BTreeMap::new(),
            grids: HashMap::new(),
            active: HashMap::new(),
            scheduler: RefreshScheduler::new(),
            tick: 0,
            next_panel: 0,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Active configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Refresh registrations.
    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// A live panel.
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    /// A live panel, mutably. Call [`Self::render`] after changing what it
    /// shows.
    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(&id)
    }

    /// Number of live panels, shown or suspended.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// The panel `actor` is looking at.
    pub fn active_panel(&self, actor: &ActorId) -> Option<PanelId> {
        self.active.get(actor).copied()
    }

    /// The panel that opened `id`.
    pub fn previous_panel(&self, id: PanelId) -> Option<PanelId> {
        self.panels.get(&id).and_then(Panel::previous_panel)
    }

    /// Whether `actor` currently has a panel on screen.
    pub fn top_grid_is_panel(&self, actor: &ActorId) -> bool {
        self.active_panel(actor)
            .and_then(|id| self.panels.get(&id))
            .is_some_and(Panel::is_shown)
    }

    /// The panel bound to a host grid.
    pub fn panel_for_grid(&self, grid: GridId) -> Option<PanelId> {
        self.grids.get(&grid).copied()
    }

    /// Open a new root panel for `actor`.
    pub fn open(
        &mut self,
        actor: ActorId,
        title: impl Into<String>,
        root: impl Component,
    ) -> PanelId {
        self.open_boxed(actor, title, Box::new(root))
    }

    /// Open a new root panel from a boxed root.
    pub fn open_boxed(
        &mut self,
        actor: ActorId,
        title: impl Into<String>,
        root: Box<dyn Component>,
    ) -> PanelId {
        self.insert_panel(actor, title.into(), root, None)
    }

    /// Open a panel chained after `previous`, for the same user.
    pub fn open_from(
        &mut self,
        previous: PanelId,
        title: impl Into<String>,
        root: impl Component,
    ) -> Result<PanelId> {
        let actor = self
            .panels
            .get(&previous)
            .map(|p| p.actor().clone())
            .ok_or(Error::UnknownPanel(previous.raw()))?;
        Ok(self.insert_panel(actor, title.into(), Box::new(root), Some(previous)))
    }

    fn insert_panel(
        &mut self,
        actor: ActorId,
        title: String,
        root: Box<dyn Component>,
        previous: Option<PanelId>,
    ) -> PanelId {
        self.next_panel += 1;
        let id = PanelId::from_raw(self.next_panel);
        tracing::debug!(
            panel = id.raw(),
            actor = actor.as_str(),
            title = title.as_str(),
            previous = previous.map(PanelId::raw),
            "panel opened"
        );
        self.panels
            .insert(id, Panel::new(id, actor, title, root, previous));
        self.show(id);
        id
    }

    /// Show a live panel again, suspending whatever its user was looking at.
    pub fn reopen(&mut self, id: PanelId) -> Result<()> {
        if !self.panels.contains_key(&id) {
            return Err(Error::UnknownPanel(id.raw()));
        }
        self.show(id);
        Ok(())
    }

    /// Return from `id` to its previous panel. `Ok(false)` when `id` has no
    /// live previous panel.
    pub fn back(&mut self, id: PanelId) -> Result<bool> {
        let panel = self
            .panels
            .get(&id)
            .ok_or(Error::UnknownPanel(id.raw()))?;
        match panel.previous_panel() {
            Some(previous) if self.panels.contains_key(&previous) => {
                self.show(previous);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Close a panel from the application side.
    pub fn close(&mut self, id: PanelId) -> Result<()> {
        if !self.panels.contains_key(&id) {
            return Err(Error::UnknownPanel(id.raw()));
        }
        self.close_panel(id, false);
        Ok(())
    }

    /// Release every panel and close every grid.
    pub fn close_all(&mut self) {
        let ids: Vec<PanelId> = self.panels.keys().copied().collect();
        for id in ids {
            self.release(id);
        }
        tracing::debug!("all panels released");
    }

    /// The host closed `grid`. Returns whether it belonged to a panel.
    pub fn handle_close(&mut self, grid: GridId) -> bool {
        let Some(id) = self.grids.remove(&grid) else {
            return false;
        };
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.unbind();
        }
        self.close_panel(id, true);
        true
    }

    /// Re-render every cell of a shown panel.
    pub fn render(&mut self, id: PanelId) -> Result<()> {
        if !self.panels.contains_key(&id) {
            return Err(Error::UnknownPanel(id.raw()));
        }
        self.render_panel(id);
        let declared = self
            .panels
            .get(&id)
            .filter(|p| p.is_shown())
            .map(Panel::declarations);
        if let Some(declared) = declared {
            self.scheduler.reconcile(id, &declared);
        }
        Ok(())
    }

    /// Change a live panel's tree with a panel-level context, for example to
    /// insert or remove grid children. Cells `f` writes reach the host while
    /// the panel is shown. Refresh registrations are reconciled and queued
    /// requests applied afterwards.
    pub fn edit<R>(
        &mut self,
        id: PanelId,
        f: impl FnOnce(&mut dyn Component, &mut Context<'_>) -> R,
    ) -> Result<R> {
        let panel = self
            .panels
            .get_mut(&id)
            .ok_or(Error::UnknownPanel(id.raw()))?;
        let tick = self.tick;
        let (result, requests) = match panel.grid() {
            Some(grid) => {
                let mut surface = HostSurface::new(&mut self.host, grid);
                panel.edit(&mut surface, tick, f)
            }
            None => panel.edit(&mut Discard, tick, f),
        };
        if panel.is_shown() {
            let declared = panel.declarations();
            self.scheduler.reconcile(id, &declared);
        }
        self.apply_requests(id, requests);
        Ok(result)
    }

    /// Deliver a host click on `grid`.
    pub fn handle_click(&mut self, grid: GridId, event: ClickEvent) -> ClickOutcome {
        let Some(id) = self.grids.get(&grid).copied() else {
            tracing::trace!(grid = grid.raw(), "click on unmanaged grid");
            return ClickOutcome::Unmanaged;
        };
        let Some(panel) = self.panels.get_mut(&id) else {
            return ClickOutcome::Unmanaged;
        };
        let _span = tracing::debug_span!(
            "dispatch",
            panel = id.raw(),
            slot = event.slot as u64,
            kind = ?event.kind
        )
        .entered();
        let tick = self.tick;
        let mut surface = HostSurface::new(&mut self.host, grid);
        let result = boundary::guard(self.config.catch_panics, || {
            panel.dispatch(&event, &mut surface, tick)
        });
        let declared = panel.declarations();
        self.scheduler.reconcile(id, &declared);

        match result {
            Ok((routed, requests)) => {
                self.apply_requests(id, requests);
                if routed {
                    ClickOutcome::Handled
                } else {
                    tracing::trace!(panel = id.raw(), "click swallowed");
                    ClickOutcome::Swallowed
                }
            }
            Err(panic) => {
                log_panic(id, "click", &panic);
                self.render_panel(id);
                ClickOutcome::Failed(panic.message)
            }
        }
    }

    /// Advance the refresh clock by one tick.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let tick = self.tick;
        let _span = tracing::trace_span!("tick", tick).entered();

        if self.config.reconcile_on_tick {
            for panel in self.panels.values().filter(|p| p.is_shown()) {
                self.scheduler.reconcile(panel.id(), &panel.declarations());
            }
        }

        let mut report = TickReport {
            tick,
            ..TickReport::default()
        };
        let mut queued = Vec::new();
        for (id, key) in self.scheduler.advance() {
            let Some(panel) = self.panels.get_mut(&id) else {
                continue;
            };
            let Some(grid) = panel.grid() else {
                continue;
            };
            let mut surface = HostSurface::new(&mut self.host, grid);
            let result = boundary::guard(self.config.catch_panics, || {
                panel.refresh(key, &mut surface, tick)
            });
            match result {
                Ok(Some((dirty, requests))) => {
                    report.fired += 1;
                    if dirty {
                        report.rendered += 1;
                    }
                    queued.push((id, requests));
                }
                Ok(None) => {
                    tracing::trace!(
                        panel = id.raw(),
                        component = key.get(),
                        "refresh target no longer reachable"
                    );
                }
                Err(panic) => {
                    log_panic(id, "refresh", &panic);
                    report.failures.push((id, panic.message));
                }
            }
        }

        for (id, requests) in queued {
            if let Some(panel) = self.panels.get(&id).filter(|p| p.is_shown()) {
                self.scheduler.reconcile(id, &panel.declarations());
            }
            self.apply_requests(id, requests);
        }
        report
    }

    fn show(&mut self, id: PanelId) {
        let Some(actor) = self.panels.get(&id).map(|p| p.actor().clone()) else {
            return;
        };
        if let Some(current) = self.active.get(&actor).copied() {
            if current != id {
                self.suspend(current);
            }
        }

        let tick = self.tick;
        let Some(panel) = self.panels.get_mut(&id) else {
            return;
        };
        let grid = match panel.grid() {
            Some(grid) => grid,
            None => {
                let grid = self
                    .host
                    .open_grid(panel.actor(), panel.title(), panel.size());
                panel.bind(grid);
                self.grids.insert(grid, id);
                grid
            }
        };
        self.active.insert(actor.clone(), id);

        let mut surface = HostSurface::new(&mut self.host, grid);
        let result = boundary::guard(self.config.catch_panics, || {
            let mut requests = panel.attach(&mut surface, tick);
            requests.extend(panel.render(&mut surface, tick));
            requests
        });
        self.scheduler.reconcile(id, &panel.declarations());
        tracing::debug!(panel = id.raw(), grid = grid.raw(), "panel shown");

        self.release_unreachable(&actor);
        match result {
            Ok(requests) => self.apply_requests(id, requests),
            Err(panic) => log_panic(id, "show", &panic),
        }
    }

    /// Take a panel off screen but keep it alive.
    fn suspend(&mut self, id: PanelId) {
        let Some(panel) = self.panels.get_mut(&id) else {
            return;
        };
        if let Some(grid) = panel.unbind() {
            self.grids.remove(&grid);
            self.host.close_grid(grid);
        }
        if self.active.get(panel.actor()) == Some(&id) {
            self.active.remove(panel.actor());
        }
        self.scheduler.cancel_panel(id);
        tracing::trace!(panel = id.raw(), "panel suspended");
    }

    /// Drop a panel for good.
    fn release(&mut self, id: PanelId) {
        let Some(mut panel) = self.panels.remove(&id) else {
            return;
        };
        if let Some(grid) = panel.unbind() {
            self.grids.remove(&grid);
            self.host.close_grid(grid);
        }
        if self.active.get(panel.actor()) == Some(&id) {
            self.active.remove(panel.actor());
        }
        let cancelled = self.scheduler.cancel_panel(id);
        let tick = self.tick;
        if let Err(panic) = boundary::guard(self.config.catch_panics, || panel.detach(tick)) {
            log_panic(id, "detach", &panic);
        }
        tracing::debug!(panel = id.raw(), cancelled, "panel released");
    }

    /// Release every panel of `actor` not on its current chain.
    fn release_unreachable(&mut self, actor: &ActorId) {
        let mut keep = BTreeSet::new();
        let mut cursor = self.active.get(actor).copied();
        while let Some(id) = cursor {
            if !keep.insert(id) {
                break;
            }
            cursor = self.panels.get(&id).and_then(Panel::previous_panel);
        }
        let doomed: Vec<PanelId> = self
            .panels
            .values()
            .filter(|p| p.actor() == actor && !keep.contains(&p.id()))
            .map(Panel::id)
            .collect();
        for id in doomed {
            self.release(id);
        }
    }

    fn close_panel(&mut self, id: PanelId, host_closed: bool) {
        let Some(panel) = self.panels.get_mut(&id) else {
            return;
        };
        let actor = panel.actor().clone();
        if let Some(grid) = panel.unbind() {
            self.grids.remove(&grid);
            if !host_closed {
                self.host.close_grid(grid);
            }
        }
        tracing::debug!(panel = id.raw(), host_closed, "panel closed");
        self.release(id);
        if self.config.release_chain_on_close {
            self.release_unreachable(&actor);
        }
    }

    /// Full render of a shown panel. Requests queued while rendering are
    /// dropped.
    fn render_panel(&mut self, id: PanelId) {
        let Some(panel) = self.panels.get(&id) else {
            return;
        };
        let Some(grid) = panel.grid() else {
            return;
        };
        let tick = self.tick;
        let mut surface = HostSurface::new(&mut self.host, grid);
        match boundary::guard(self.config.catch_panics, || panel.render(&mut surface, tick)) {
            Ok(requests) if !requests.is_empty() => {
                tracing::trace!(
                    panel = id.raw(),
                    dropped = requests.len(),
                    "requests queued during render ignored"
                );
            }
            Ok(_) => {}
            Err(panic) => log_panic(id, "render", &panic),
        }
    }

    fn apply_requests(&mut self, id: PanelId, requests: Vec<Request>) {
        let Some(actor) = self.panels.get(&id).map(|p| p.actor().clone()) else {
            return;
        };
        for request in requests {
            tracing::trace!(panel = id.raw(), ?request, "applying request");
            match request {
                Request::Open { title, root } => {
                    let previous = self.panels.contains_key(&id).then_some(id);
                    self.insert_panel(actor.clone(), title, root, previous);
                }
                Request::Back => {
                    if let Ok(false) = self.back(id) {
                        tracing::trace!(panel = id.raw(), "back without previous panel");
                    }
                }
                Request::Reopen(target) => {
                    if let Err(err) = self.reopen(target) {
                        tracing::warn!(panel = id.raw(), %err, "reopen failed");
                    }
                }
                Request::Close => self.close_panel(id, false),
                Request::RenderAll => self.render_panel(id),
                Request::Cue(cue) => self.host.play_cue(&actor, &cue),
            }
        }
    }
}

impl<H: Host + fmt::Debug> fmt::Debug for Runtime<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("panels", &self.panels.len())
            .field("scheduled", &self.scheduler.len())
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use gridmenu_core::{ClickKind, Content};
    use gridmenu_widgets::{Button, Grid, Icon};

    fn steve() -> ActorId {
        ActorId::new("steve")
    }

    fn icon(kind: &'static str) -> Icon {
        Icon::builder().content(Content::new(kind)).build().unwrap()
    }

    fn click(runtime: &mut Runtime<MemoryHost>, slot: usize) -> ClickOutcome {
        let grid = runtime.host().open_grid_for(&steve()).unwrap();
        runtime.handle_click(grid, ClickEvent::new(slot, ClickKind::Left, steve()))
    }

    #[test]
    fn open_binds_a_grid_and_renders() {
        let mut runtime = Runtime::new(MemoryHost::new());
        let id = runtime.open(steve(), "Hello", icon("stone"));
        let grid = runtime.panel(id).unwrap().grid().unwrap();
        assert_eq!(runtime.host().title(grid), Some("Hello"));
        assert_eq!(runtime.host().kind_at(grid, 0), Some("stone"));
        assert!(runtime.top_grid_is_panel(&steve()));
        assert_eq!(runtime.panel_for_grid(grid), Some(id));
    }

    #[test]
    fn unmanaged_grids_are_left_alone() {
        let mut runtime = Runtime::new(MemoryHost::new());
        let outcome = runtime.handle_click(
            GridId::from_raw(77),
            ClickEvent::new(0, ClickKind::Left, steve()),
        );
        assert_eq!(outcome, ClickOutcome::Unmanaged);
        assert!(!outcome.cancels_default());
        assert!(!runtime.handle_close(GridId::from_raw(77)));
    }

    #[test]
    fn empty_cells_swallow_clicks() {
        let mut runtime = Runtime::new(MemoryHost::new());
        let root = Grid::builder().size(3, 1).child(0, icon("a")).build().unwrap();
        runtime.open(steve(), "Grid", root);
        let outcome = click(&mut runtime, 2);
        assert_eq!(outcome, ClickOutcome::Swallowed);
        assert!(outcome.cancels_default());
        assert_eq!(click(&mut runtime, 0), ClickOutcome::Handled);
    }

    #[test]
    fn opening_a_new_root_releases_the_old_chain() {
        let mut runtime = Runtime::new(MemoryHost::new());
        let first = runtime.open(steve(), "One", icon("a"));
        let second = runtime.open(steve(), "Two", icon("b"));
        assert!(runtime.panel(first).is_none());
        assert_eq!(runtime.active_panel(&steve()), Some(second));
        assert_eq!(runtime.panel_count(), 1);
    }

    #[test]
    fn unknown_panels_are_errors() {
        let mut runtime = Runtime::new(MemoryHost::new());
        let ghost = PanelId::from_raw(9);
        assert_eq!(runtime.reopen(ghost), Err(Error::UnknownPanel(9)));
        assert_eq!(runtime.back(ghost), Err(Error::UnknownPanel(9)));
        assert_eq!(runtime.close(ghost), Err(Error::UnknownPanel(9)));
        assert!(runtime.open_from(ghost, "x", icon("a")).is_err());
    }

    #[test]
    fn cue_requests_reach_the_host() {
        let mut runtime = Runtime::new(MemoryHost::new());
        let button = Button::builder()
            .content(Content::new("bell"))
            .cue(Some(gridmenu_core::Cue::click()))
            .on_click(|_, _| {})
            .build()
            .unwrap();
        runtime.open(steve(), "Cue", button);
        click(&mut runtime, 0);
        assert_eq!(runtime.host().cues().len(), 1);
        assert_eq!(runtime.host().cues()[0].0, steve());
    }

    #[test]
    fn close_all_releases_everything() {
        let mut runtime = Runtime::new(MemoryHost::new());
        runtime.open(steve(), "One", icon("a"));
        runtime.open(ActorId::new("alex"), "Two", icon("b"));
        runtime.close_all();
        assert_eq!(runtime.panel_count(), 0);
        assert!(runtime.host().open_grid_for(&steve()).is_none());
    }
}
