#![forbid(unsafe_code)]

//! End-to-end runtime scenarios against the in-memory host.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use gridmenu_core::{ActorId, Cell, ClickEvent, ClickKind, Content, Size};
use gridmenu_runtime::{ClickOutcome, Host, MemoryHost, Runtime, RuntimeConfig};
use gridmenu_widgets::confirmation::{ConfirmationPanel, NO_SLOT, YES_SLOT};
use gridmenu_widgets::testing::Harness;
use gridmenu_widgets::{
    Button, Component, ComponentBase, Context, DoubleConfirmButton, Grid, Icon, Items, Toggle,
};

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Records lifecycle notifications.
struct Lifecycle {
    base: ComponentBase,
    log: Log,
}

impl Lifecycle {
    fn new(log: Log) -> Self {
        Self {
            base: ComponentBase::new(Some("watcher".to_owned())),
            log,
        }
    }
}

impl Component for Lifecycle {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn size(&self) -> Size {
        Size::ONE
    }

    fn items(&self, _ctx: &Context<'_>) -> Items {
        Items::from([(Cell::ORIGIN, Content::new("watcher"))])
    }

    fn on_attach(&mut self, _ctx: &mut Context<'_>) {
        self.log.borrow_mut().push("attach");
    }

    fn on_detach(&mut self, _ctx: &mut Context<'_>) {
        self.log.borrow_mut().push("detach");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn steve() -> ActorId {
    ActorId::new("steve")
}

fn click(runtime: &mut Runtime<MemoryHost>, slot: usize, kind: ClickKind) -> ClickOutcome {
    let grid = runtime
        .host()
        .open_grid_for(&steve())
        .expect("steve has a grid open");
    runtime.handle_click(grid, ClickEvent::new(slot, kind, steve()))
}

fn shown(runtime: &Runtime<MemoryHost>, slot: usize) -> Option<String> {
    let grid = runtime.host().open_grid_for(&steve())?;
    runtime.host().kind_at(grid, slot).map(str::to_owned)
}

fn icon(kind: &'static str) -> Icon {
    Icon::builder().content(Content::new(kind)).build().unwrap()
}

#[test]
fn animation_advances_on_its_interval_only() {
    let spinner = Button::builder()
        .id("spinner")
        .animation_frames([Content::new("a"), Content::new("b"), Content::new("c")])
        .animation_interval(5)
        .build()
        .unwrap();
    let root = Grid::builder()
        .size(9, 1)
        .child(0, spinner)
        .child(1, icon("still"))
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    runtime.open(steve(), "Spin", root);
    let grid = runtime.host().open_grid_for(&steve()).unwrap();
    runtime.host_mut().reset_writes(grid);

    for expected in ["b", "c", "a"] {
        for step in 1..=5 {
            let report = runtime.tick();
            assert_eq!(report.fired, usize::from(step == 5));
        }
        assert_eq!(shown(&runtime, 0).as_deref(), Some(expected));
    }
    assert_eq!(shown(&runtime, 1).as_deref(), Some("still"));
    assert_eq!(runtime.host().write_count(grid), 3);
}

#[test]
fn dynamic_content_tracks_the_tick() {
    let clock = Button::builder()
        .dynamic_content(|ctx| Content::new("clock").label(format!("{}s", ctx.tick() / 20)))
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    let id = runtime.open(steve(), "Clock", clock);
    let grid = runtime.panel(id).unwrap().grid().unwrap();
    for _ in 0..40 {
        runtime.tick();
    }
    let label = runtime
        .host()
        .content(grid, 0)
        .and_then(|c| c.label_text().map(str::to_owned));
    assert_eq!(label.as_deref(), Some("2s"));
}

#[test]
fn back_returns_to_previous_panel_with_state() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let page_log = log.clone();
    let flag = Toggle::builder()
        .id("flag")
        .on_content(Content::new("on"))
        .off_content(Content::new("off"))
        .build()
        .unwrap();
    let next = Button::builder()
        .content(Content::new("arrow"))
        .on_click(move |_, ctx| {
            let back = Button::builder()
                .content(Content::new("back"))
                .on_click(|_, ctx| {
                    ctx.back();
                })
                .build()
                .unwrap();
            let page = Grid::builder()
                .size(9, 1)
                .child(0, back)
                .child(4, Lifecycle::new(page_log.clone()))
                .build()
                .unwrap();
            ctx.open("Two", page);
        })
        .build()
        .unwrap();
    let root = Grid::builder()
        .size(9, 1)
        .child(0, flag)
        .child(8, next)
        .build()
        .unwrap();

    let mut runtime = Runtime::new(MemoryHost::new());
    let first = runtime.open(steve(), "One", root);
    assert_eq!(click(&mut runtime, 0, ClickKind::Left), ClickOutcome::Handled);
    assert_eq!(shown(&runtime, 0).as_deref(), Some("on"));

    click(&mut runtime, 8, ClickKind::Left);
    let second = runtime.active_panel(&steve()).unwrap();
    assert_ne!(second, first);
    assert_eq!(runtime.previous_panel(second), Some(first));
    assert!(!runtime.panel(first).unwrap().is_shown());
    assert_eq!(shown(&runtime, 4).as_deref(), Some("watcher"));
    assert_eq!(*log.borrow(), vec!["attach"]);

    click(&mut runtime, 0, ClickKind::Left);
    assert_eq!(runtime.active_panel(&steve()), Some(first));
    assert!(runtime.panel(second).is_none());
    assert_eq!(*log.borrow(), vec!["attach", "detach"]);
    assert_eq!(shown(&runtime, 0).as_deref(), Some("on"));
    let toggle = runtime
        .panel(first)
        .and_then(|p| p.find_as::<Toggle>("flag"))
        .unwrap();
    assert!(toggle.state());
}

#[test]
fn back_at_chain_root_is_a_no_op() {
    let button = Button::builder()
        .content(Content::new("back"))
        .on_click(|_, ctx| {
            assert!(!ctx.back());
        })
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    let id = runtime.open(steve(), "Root", button);
    assert_eq!(click(&mut runtime, 0, ClickKind::Left), ClickOutcome::Handled);
    assert_eq!(runtime.active_panel(&steve()), Some(id));
    assert_eq!(runtime.back(id), Ok(false));
}

#[test]
fn host_close_releases_chain_and_cancels_refreshes() {
    let mut runtime = Runtime::new(MemoryHost::new());
    let first = runtime.open(steve(), "One", icon("a"));
    let spinner = Button::builder()
        .animation_frames([Content::new("x"), Content::new("y")])
        .animation_interval(1)
        .build()
        .unwrap();
    let second = runtime.open_from(first, "Two", spinner).unwrap();
    assert_eq!(runtime.scheduler().registrations(second).len(), 1);

    let grid = runtime.panel(second).unwrap().grid().unwrap();
    assert!(runtime.handle_close(grid));
    assert_eq!(runtime.panel_count(), 0);
    assert!(runtime.scheduler().is_empty());
    assert_eq!(runtime.tick().fired, 0);
    assert!(!runtime.top_grid_is_panel(&steve()));
}

#[test]
fn chain_can_outlive_a_close_when_configured() {
    let config = RuntimeConfig::default().with_release_chain_on_close(false);
    let mut runtime = Runtime::with_config(MemoryHost::new(), config);
    let first = runtime.open(steve(), "One", icon("a"));
    let second = runtime.open_from(first, "Two", icon("b")).unwrap();

    runtime.close(second).unwrap();
    assert!(runtime.panel(second).is_none());
    assert!(runtime.panel(first).is_some());
    assert_eq!(runtime.active_panel(&steve()), None);

    runtime.reopen(first).unwrap();
    assert_eq!(shown(&runtime, 0).as_deref(), Some("a"));
}

#[test]
fn hidden_components_stop_refreshing() {
    let spinner = Button::builder()
        .id("spinner")
        .animation_frames([Content::new("x"), Content::new("y")])
        .animation_interval(1)
        .build()
        .unwrap();
    let root = Grid::builder().size(3, 1).child(0, spinner).build().unwrap();

    // Without tick reconciliation the stale registration fires into nothing.
    let config = RuntimeConfig::default().with_reconcile_on_tick(false);
    let mut runtime = Runtime::with_config(MemoryHost::new(), config);
    let id = runtime.open(steve(), "Spin", root);
    assert_eq!(runtime.tick().fired, 1);
    runtime
        .panel_mut(id)
        .and_then(|p| p.find_mut("spinner"))
        .unwrap()
        .set_visible(false);
    let report = runtime.tick();
    assert_eq!(report.fired, 0);
    assert!(report.failures.is_empty());

    // A full render reconciles.
    runtime.render(id).unwrap();
    assert!(runtime.scheduler().is_empty());
    assert_eq!(shown(&runtime, 0), None);
}

#[test]
fn click_keeps_later_overlapping_sibling() {
    let toggle = Toggle::builder()
        .size(2, 1)
        .on_content(Content::new("on"))
        .off_content(Content::new("off"))
        .build()
        .unwrap();
    let root = Grid::builder()
        .size(9, 1)
        .child(0, toggle)
        .child(1, icon("cover"))
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    runtime.open(steve(), "Overlap", root);
    assert_eq!(shown(&runtime, 1).as_deref(), Some("cover"));

    assert_eq!(click(&mut runtime, 0, ClickKind::Left), ClickOutcome::Handled);
    assert_eq!(shown(&runtime, 0).as_deref(), Some("on"));
    assert_eq!(shown(&runtime, 1).as_deref(), Some("cover"));
}

#[test]
fn removed_child_stops_refreshing() {
    let spinner = Button::builder()
        .animation_frames([Content::new("x"), Content::new("y")])
        .animation_interval(3)
        .build()
        .unwrap();
    let key = spinner.key();
    let root = Grid::builder()
        .size(9, 1)
        .child(0, spinner)
        .child(1, icon("stone"))
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    let id = runtime.open(steve(), "Spin", root);
    assert!(runtime.scheduler().is_registered(id, key));

    let removed = runtime
        .edit(id, |root, ctx| {
            root.as_any_mut()
                .downcast_mut::<Grid>()
                .and_then(|grid| grid.remove(0, ctx))
        })
        .unwrap();
    assert_eq!(removed.map(|c| c.key()), Some(key));
    assert!(!runtime.scheduler().is_registered(id, key));
    assert_eq!(shown(&runtime, 0), None);
    assert_eq!(shown(&runtime, 1).as_deref(), Some("stone"));

    for _ in 0..10 {
        assert_eq!(runtime.tick().fired, 0);
    }
    assert_eq!(shown(&runtime, 0), None);
}

#[test]
fn tick_for_detached_component_is_silent() {
    let spinner = Button::builder()
        .animation_frames([Content::new("x"), Content::new("y")])
        .animation_interval(1)
        .build()
        .unwrap();
    let key = spinner.key();
    let root = Grid::builder().size(9, 1).child(0, spinner).build().unwrap();
    let config = RuntimeConfig::default().with_reconcile_on_tick(false);
    let mut runtime = Runtime::with_config(MemoryHost::new(), config);
    let id = runtime.open(steve(), "Spin", root);

    // Detach behind the runtime's back so the registration goes stale.
    let mut bench = Harness::new(Size::new(9, 1).unwrap());
    let removed = runtime
        .panel_mut(id)
        .and_then(|p| p.root_mut().as_any_mut().downcast_mut::<Grid>())
        .and_then(|grid| grid.remove(0, &mut bench.ctx()));
    assert!(removed.is_some());
    assert!(runtime.scheduler().is_registered(id, key));

    let report = runtime.tick();
    assert_eq!(report.fired, 0);
    assert_eq!(report.rendered, 0);
    assert!(report.failures.is_empty());
    assert_eq!(shown(&runtime, 0).as_deref(), Some("x"));

    runtime.render(id).unwrap();
    assert!(!runtime.scheduler().is_registered(id, key));
}

#[test]
fn double_confirm_expires_through_the_scheduler() {
    let confirmed = Rc::new(RefCell::new(0));
    let sink = confirmed.clone();
    let dropper = DoubleConfirmButton::builder()
        .content(Content::new("dropper"))
        .confirm_content(Content::new("sure"))
        .window(60)
        .on_confirm(move |_, _| *sink.borrow_mut() += 1)
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    let id = runtime.open(steve(), "Drop", dropper);
    assert!(runtime.scheduler().is_empty());

    click(&mut runtime, 0, ClickKind::Drop);
    assert_eq!(shown(&runtime, 0).as_deref(), Some("sure"));
    assert_eq!(runtime.scheduler().registrations(id).len(), 1);

    for _ in 0..60 {
        runtime.tick();
    }
    assert_eq!(shown(&runtime, 0).as_deref(), Some("sure"));
    runtime.tick();
    assert_eq!(shown(&runtime, 0).as_deref(), Some("dropper"));
    assert!(runtime.scheduler().is_empty());

    click(&mut runtime, 0, ClickKind::Drop);
    runtime.tick();
    click(&mut runtime, 0, ClickKind::Drop);
    assert_eq!(*confirmed.borrow(), 1);
    assert_eq!(shown(&runtime, 0).as_deref(), Some("dropper"));
}

#[test]
fn confirmation_choice_closes_the_panel() {
    let picked = Rc::new(RefCell::new(Vec::new()));
    let (yes, no) = (picked.clone(), picked.clone());
    let confirmation = ConfirmationPanel::new("Sure?")
        .on_yes(move |_, _| yes.borrow_mut().push("yes"))
        .on_no(move |_, _| no.borrow_mut().push("no"))
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    runtime.open(steve(), confirmation.title, confirmation.root);
    assert_eq!(shown(&runtime, NO_SLOT).as_deref(), Some("red_dye"));
    assert_eq!(click(&mut runtime, YES_SLOT, ClickKind::Left), ClickOutcome::Handled);
    assert_eq!(*picked.borrow(), vec!["yes"]);
    assert_eq!(runtime.panel_count(), 0);
    assert_eq!(runtime.host().open_grid_for(&steve()), None);
}

#[test]
fn panicking_handler_is_contained() {
    let bomb = Button::builder()
        .content(Content::new("tnt"))
        .on_click(|_, _| panic!("kaboom"))
        .build()
        .unwrap();
    let counter = Toggle::builder()
        .on_content(Content::new("on"))
        .off_content(Content::new("off"))
        .build()
        .unwrap();
    let root = Grid::builder()
        .size(9, 1)
        .child(0, bomb)
        .child(1, counter)
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    runtime.open(steve(), "Boom", root);

    let outcome = click(&mut runtime, 0, ClickKind::Left);
    assert_eq!(outcome, ClickOutcome::Failed("kaboom".to_owned()));
    assert!(outcome.cancels_default());

    assert_eq!(click(&mut runtime, 1, ClickKind::Left), ClickOutcome::Handled);
    assert_eq!(shown(&runtime, 1).as_deref(), Some("on"));
    assert_eq!(shown(&runtime, 0).as_deref(), Some("tnt"));
    assert!(runtime.tick().failures.is_empty());
}

#[test]
fn panicking_refresh_is_reported_per_tick() {
    let broken = Button::builder()
        .dynamic_content(|ctx| {
            if ctx.tick() > 0 {
                panic!("clock broke at {}", ctx.tick());
            }
            Content::new("clock")
        })
        .update_interval(2)
        .build()
        .unwrap();
    let mut runtime = Runtime::new(MemoryHost::new());
    let id = runtime.open(steve(), "Broken", broken);
    assert!(runtime.tick().failures.is_empty());
    let report = runtime.tick();
    assert_eq!(report.failures, vec![(id, "clock broke at 2".to_owned())]);
    assert!(runtime.panel(id).is_some());
}
