#![forbid(unsafe_code)]

//! Clickable button with static, dynamic, or animated content.
//!
//! Dynamic and animated buttons declare a refresh interval (default 20
//! ticks). On each refresh a dynamic button asks to be re-rendered so its
//! content function runs again; an animated button advances to the next
//! frame, wrapping after the last.
//!
//! Click handlers are picked by click kind. A secondary action (a drop) only
//! reaches `on_secondary_action`. Any other click runs the matching specific
//! handlers (`on_left_click`, `on_right_click`, `on_shift_click`) and then
//! the generic `on_click`.

use std::any::Any;
use std::fmt;

use gridmenu_core::{ClickEvent, Content, Cue, Error, Result, Size};

use crate::context::Context;
use crate::source::ContentSource;
use crate::{checked_size, fill, Component, ComponentBase, Items};

/// Refresh interval used when none is configured.
pub const DEFAULT_INTERVAL: u32 = 20;

type ClickHandler = Box<dyn FnMut(&ClickEvent, &mut Context<'_>)>;

enum Appearance {
    Static(ContentSource),
    Dynamic {
        source: ContentSource,
        interval: u32,
    },
    Animated {
        frames: Vec<ContentSource>,
        interval: u32,
        frame: usize,
    },
}

enum AppearanceConfig {
    Static(ContentSource),
    Dynamic(ContentSource),
    Animated(Vec<ContentSource>),
}

#[derive(Default)]
struct Handlers {
    click: Option<ClickHandler>,
    left: Option<ClickHandler>,
    right: Option<ClickHandler>,
    shift: Option<ClickHandler>,
    secondary: Option<ClickHandler>,
}

impl Handlers {
    fn dispatch(&mut self, event: &ClickEvent, ctx: &mut Context<'_>) -> bool {
        let kind = event.kind;
        if kind.is_secondary() {
            return run(&mut self.secondary, event, ctx);
        }
        let mut ran = false;
        if kind.is_left() {
            ran |= run(&mut self.left, event, ctx);
        }
        if kind.is_right() {
            ran |= run(&mut self.right, event, ctx);
        }
        if kind.is_shift() {
            ran |= run(&mut self.shift, event, ctx);
        }
        ran | run(&mut self.click, event, ctx)
    }
}

fn run(handler: &mut Option<ClickHandler>, event: &ClickEvent, ctx: &mut Context<'_>) -> bool {
    match handler {
        Some(f) => {
            f(event, ctx);
            true
        }
        None => false,
    }
}

/// A clickable component.
pub struct Button {
    base: ComponentBase,
    size: Size,
    appearance: Appearance,
    cue: Option<Cue>,
    handlers: Handlers,
}

/// Configuration for a [`Button`].
pub struct ButtonBuilder {
    id: Option<String>,
    size: Option<(u16, u16)>,
    appearance: Option<AppearanceConfig>,
    update_interval: u32,
    animation_interval: u32,
    cue: Option<Cue>,
    handlers: Handlers,
}

impl Default for ButtonBuilder {
    fn default() -> Self {
        Self {
            id: None,
            size: None,
            appearance: None,
            update_interval: DEFAULT_INTERVAL,
            animation_interval: DEFAULT_INTERVAL,
            cue: None,
            handlers: Handlers::default(),
        }
    }
}

impl ButtonBuilder {
    /// Caller-supplied identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Footprint (defaults to 1x1).
    #[must_use]
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Static content.
    #[must_use]
    pub fn content(mut self, content: Content) -> Self {
        self.appearance = Some(AppearanceConfig::Static(content.into()));
        self
    }

    /// Content recomputed every `update_interval` ticks.
    #[must_use]
    pub fn dynamic_content(mut self, f: impl Fn(&Context<'_>) -> Content + 'static) -> Self {
        self.appearance = Some(AppearanceConfig::Dynamic(ContentSource::dynamic(f)));
        self
    }

    /// Ticks between dynamic content refreshes.
    #[must_use]
    pub fn update_interval(mut self, ticks: u32) -> Self {
        self.update_interval = ticks;
        self
    }

    /// Frames cycled every `animation_interval` ticks.
    #[must_use]
    pub fn animation_frames(mut self, frames: impl IntoIterator<Item = Content>) -> Self {
        self.appearance = Some(AppearanceConfig::Animated(
            frames.into_iter().map(ContentSource::from).collect(),
        ));
        self
    }

    /// Frames that may each be fixed or computed per render.
    #[must_use]
    pub fn animation_sources(mut self, frames: Vec<ContentSource>) -> Self {
        self.appearance = Some(AppearanceConfig::Animated(frames));
        self
    }

    /// Ticks between animation frames.
    #[must_use]
    pub fn animation_interval(mut self, ticks: u32) -> Self {
        self.animation_interval = ticks;
        self
    }

    /// Cue played when a click runs at least one handler.
    #[must_use]
    pub fn cue(mut self, cue: Option<Cue>) -> Self {
        self.cue = cue;
        self
    }

    /// Any click other than a secondary action.
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static) -> Self {
        self.handlers.click = Some(Box::new(f));
        self
    }

    /// Primary-button clicks, before `on_click`.
    #[must_use]
    pub fn on_left_click(
        mut self,
        f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static,
    ) -> Self {
        self.handlers.left = Some(Box::new(f));
        self
    }

    /// Secondary-button clicks, before `on_click`.
    #[must_use]
    pub fn on_right_click(
        mut self,
        f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static,
    ) -> Self {
        self.handlers.right = Some(Box::new(f));
        self
    }

    /// Shift clicks, before `on_click`.
    #[must_use]
    pub fn on_shift_click(
        mut self,
        f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static,
    ) -> Self {
        self.handlers.shift = Some(Box::new(f));
        self
    }

    /// The secondary action (a drop).
    #[must_use]
    pub fn on_secondary_action(
        mut self,
        f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static,
    ) -> Self {
        self.handlers.secondary = Some(Box::new(f));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Button> {
        let appearance = match self.appearance {
            None => return Err(Error::MissingContent("button content")),
            Some(AppearanceConfig::Static(source)) => Appearance::Static(source),
            Some(AppearanceConfig::Dynamic(source)) => Appearance::Dynamic {
                source,
                interval: checked_interval(self.update_interval)?,
            },
            Some(AppearanceConfig::Animated(frames)) => {
                if frames.is_empty() {
                    return Err(Error::NoFrames);
                }
                Appearance::Animated {
                    frames,
                    interval: checked_interval(self.animation_interval)?,
                    frame: 0,
                }
            }
        };
        Ok(Button {
            base: ComponentBase::new(self.id),
            size: checked_size(self.size)?,
            appearance,
            cue: self.cue,
            handlers: self.handlers,
        })
    }
}

fn checked_interval(ticks: u32) -> Result<u32> {
    if ticks == 0 {
        return Err(Error::InvalidInterval);
    }
    Ok(ticks)
}

impl Button {
    /// Start configuring a button.
    pub fn builder() -> ButtonBuilder {
        ButtonBuilder::default()
    }

    /// Index of the frame currently shown (always 0 unless animated).
    pub fn frame(&self) -> usize {
        match &self.appearance {
            Appearance::Animated { frame, .. } => *frame,
            _ => 0,
        }
    }

    /// Whether the button cycles frames.
    pub fn is_animated(&self) -> bool {
        matches!(self.appearance, Appearance::Animated { .. })
    }

    fn source(&self) -> &ContentSource {
        match &self.appearance {
            Appearance::Static(source) | Appearance::Dynamic { source, .. } => source,
            Appearance::Animated { frames, frame, .. } => &frames[*frame],
        }
    }
}

impl Component for Button {
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
        if !self.is_visible() {
            return Items::new();
        }
        fill(self.size, &self.source().resolve(ctx))
    }

    fn on_click(&mut self, event: &ClickEvent, ctx: &mut Context<'_>) {
        if !self.is_interactable() {
            return;
        }
        if self.handlers.dispatch(event, ctx) {
            if let Some(cue) = &self.cue {
                ctx.play_cue(cue.clone());
            }
        }
    }

    fn refresh_interval(&self) -> Option<u32> {
        match &self.appearance {
            Appearance::Static(_) => None,
            Appearance::Dynamic { interval, .. } | Appearance::Animated { interval, .. } => {
                Some(*interval)
            }
        }
    }

    fn refresh(&mut self, _ctx: &Context<'_>) -> bool {
        match &mut self.appearance {
            Appearance::Static(_) => false,
            Appearance::Dynamic { .. } => true,
            Appearance::Animated { frames, frame, .. } => {
                *frame = (*frame + 1) % frames.len();
                true
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("base", &self.base)
            .field("size", &self.size)
            .field("frame", &self.frame())
            .field("refresh_interval", &self.refresh_interval())
            .field("cue", &self.cue)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ButtonBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonBuilder")
            .field("id", &self.id)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Request;
    use crate::testing::Harness;
    use gridmenu_core::ClickKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder(
        log: &Log,
        tag: &'static str,
    ) -> impl FnMut(&ClickEvent, &mut Context<'_>) + 'static {
        let log = log.clone();
        move |_: &ClickEvent, _: &mut Context<'_>| log.borrow_mut().push(tag)
    }

    fn full_button(log: &Log) -> Button {
        Button::builder()
            .content(Content::new("stone_button"))
            .on_click(recorder(log, "click"))
            .on_left_click(recorder(log, "left"))
            .on_right_click(recorder(log, "right"))
            .on_shift_click(recorder(log, "shift"))
            .on_secondary_action(recorder(log, "secondary"))
            .build()
            .unwrap()
    }

    #[test]
    fn specific_handlers_run_before_generic() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut button = full_button(&log);
        let mut harness = Harness::new(Size::ONE);

        harness.click(&mut button, 0, ClickKind::ShiftLeft);
        assert_eq!(*log.borrow(), vec!["left", "shift", "click"]);

        log.borrow_mut().clear();
        harness.click(&mut button, 0, ClickKind::Right);
        assert_eq!(*log.borrow(), vec!["right", "click"]);

        log.borrow_mut().clear();
        harness.click(&mut button, 0, ClickKind::Middle);
        assert_eq!(*log.borrow(), vec!["click"]);
    }

    #[test]
    fn secondary_action_only_reaches_its_handler() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut button = full_button(&log);
        let mut harness = Harness::new(Size::ONE);
        harness.click(&mut button, 0, ClickKind::ControlDrop);
        assert_eq!(*log.borrow(), vec!["secondary"]);
    }

    #[test]
    fn disabled_button_runs_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut button = full_button(&log);
        button.set_enabled(false);
        let mut harness = Harness::new(Size::ONE);
        harness.click(&mut button, 0, ClickKind::Left);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn cue_plays_only_when_a_handler_ran() {
        let mut button = Button::builder()
            .content(Content::new("lever"))
            .cue(Some(Cue::new("block.lever.click")))
            .on_left_click(|_, _| {})
            .build()
            .unwrap();
        let mut harness = Harness::new(Size::ONE);
        harness.click(&mut button, 0, ClickKind::Right);
        assert!(harness.requests.is_empty());
        harness.click(&mut button, 0, ClickKind::Left);
        assert!(matches!(&harness.take_requests()[..], [Request::Cue(_)]));
    }

    #[test]
    fn animation_cycles_frames() {
        let mut button = Button::builder()
            .animation_frames(["red", "green", "blue"].map(Content::new))
            .animation_interval(5)
            .size(2, 2)
            .build()
            .unwrap();
        assert_eq!(button.refresh_interval(), Some(5));
        let mut harness = Harness::new(Size::new(2, 2).unwrap());
        harness.render(&button);
        assert_eq!(harness.kind_at(3), Some("red"));

        assert!(harness.refresh(&mut button, 5));
        assert_eq!(button.frame(), 1);
        assert_eq!(harness.kind_at(0), Some("green"));
        harness.refresh(&mut button, 5);
        harness.refresh(&mut button, 5);
        assert_eq!(button.frame(), 0);
        assert_eq!(harness.kind_at(3), Some("red"));
    }

    #[test]
    fn dynamic_content_reruns_on_refresh() {
        let mut button = Button::builder()
            .dynamic_content(|ctx| Content::new("clock").label(format!("tick {}", ctx.tick())))
            .build()
            .unwrap();
        assert_eq!(button.refresh_interval(), Some(DEFAULT_INTERVAL));
        let mut harness = Harness::new(Size::ONE);
        harness.render(&button);
        assert_eq!(harness.at(0).and_then(Content::label_text), Some("tick 0"));
        assert!(harness.refresh(&mut button, 20));
        assert_eq!(harness.at(0).and_then(Content::label_text), Some("tick 20"));
    }

    #[test]
    fn static_button_never_refreshes() {
        let mut button = Button::builder().content(Content::new("oak_door")).build().unwrap();
        assert_eq!(button.refresh_interval(), None);
        let mut harness = Harness::new(Size::ONE);
        assert!(!harness.refresh(&mut button, 1));
    }

    #[test]
    fn configuration_errors() {
        assert_eq!(
            Button::builder().build().unwrap_err(),
            Error::MissingContent("button content")
        );
        assert_eq!(
            Button::builder()
                .animation_frames(Vec::new())
                .build()
                .unwrap_err(),
            Error::NoFrames
        );
        assert_eq!(
            Button::builder()
                .dynamic_content(|_| Content::new("x"))
                .update_interval(0)
                .build()
                .unwrap_err(),
            Error::InvalidInterval
        );
    }
}
