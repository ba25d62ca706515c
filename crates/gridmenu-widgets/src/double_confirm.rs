#![forbid(unsafe_code)]

//! Button that needs two secondary actions to confirm.
//!
//! ```text
//! Idle --secondary--> Armed(since = tick)      shows confirm content
//! Armed --secondary, tick - since <= window--> Idle + on_confirm
//! Armed --secondary, tick - since > window---> Armed(since = tick)
//! Armed --refresh, tick - since > window-----> Idle (silent)
//! ```
//!
//! While armed the button declares a one-tick refresh interval so the
//! scheduler can expire it.

use std::any::Any;
use std::fmt;

use gridmenu_core::{ClickEvent, Content, Cue, Error, Result, Size};

use crate::context::Context;
use crate::source::ContentSource;
use crate::{checked_size, fill, Component, ComponentBase, Items};

/// Ticks an armed button waits for the second action.
pub const DEFAULT_WINDOW: u64 = 60;

type ClickHandler = Box<dyn FnMut(&ClickEvent, &mut Context<'_>)>;

/// Confirmation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    /// Waiting for a first secondary action.
    #[default]
    Idle,
    /// First action seen at `since`.
    Armed {
        /// Tick of the arming action.
        since: u64,
    },
}

/// A button guarding a destructive action behind a second confirmation.
pub struct DoubleConfirmButton {
    base: ComponentBase,
    size: Size,
    primary: ContentSource,
    confirm: ContentSource,
    window: u64,
    state: ConfirmState,
    cue: Option<Cue>,
    on_click: Option<ClickHandler>,
    on_confirm: Option<ClickHandler>,
}

/// Configuration for a [`DoubleConfirmButton`].
pub struct DoubleConfirmBuilder {
    id: Option<String>,
    size: Option<(u16, u16)>,
    primary: Option<ContentSource>,
    confirm: Option<ContentSource>,
    window: u64,
    cue: Option<Cue>,
    on_click: Option<ClickHandler>,
    on_confirm: Option<ClickHandler>,
}

impl Default for DoubleConfirmBuilder {
    fn default() -> Self {
        Self {
            id: None,
            size: None,
            primary: None,
            confirm: None,
            window: DEFAULT_WINDOW,
            cue: None,
            on_click: None,
            on_confirm: None,
        }
    }
}

impl DoubleConfirmBuilder {
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

    /// Content shown while idle.
    #[must_use]
    pub fn content(mut self, content: Content) -> Self {
        self.primary = Some(content.into());
        self
    }

    /// Content shown while idle, computed per render.
    #[must_use]
    pub fn content_with(mut self, f: impl Fn(&Context<'_>) -> Content + 'static) -> Self {
        self.primary = Some(ContentSource::dynamic(f));
        self
    }

    /// Content shown while armed.
    #[must_use]
    pub fn confirm_content(mut self, content: Content) -> Self {
        self.confirm = Some(content.into());
        self
    }

    /// Content shown while armed, computed per render.
    #[must_use]
    pub fn confirm_content_with(
        mut self,
        f: impl Fn(&Context<'_>) -> Content + 'static,
    ) -> Self {
        self.confirm = Some(ContentSource::dynamic(f));
        self
    }

    /// Ticks the second action may lag behind the first (inclusive).
    #[must_use]
    pub fn window(mut self, ticks: u64) -> Self {
        self.window = ticks;
        self
    }

    /// Cue played on every secondary action.
    #[must_use]
    pub fn cue(mut self, cue: Option<Cue>) -> Self {
        self.cue = cue;
        self
    }

    /// Any click other than a secondary action.
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Called once per confirmed pair of secondary actions.
    #[must_use]
    pub fn on_confirm(mut self, f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static) -> Self {
        self.on_confirm = Some(Box::new(f));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<DoubleConfirmButton> {
        if self.window == 0 {
            return Err(Error::InvalidInterval);
        }
        Ok(DoubleConfirmButton {
            base: ComponentBase::new(self.id),
            size: checked_size(self.size)?,
            primary: self
                .primary
                .ok_or(Error::MissingContent("double confirm content"))?,
            confirm: self
                .confirm
                .ok_or(Error::MissingContent("double confirm confirm content"))?,
            window: self.window,
            state: ConfirmState::Idle,
            cue: self.cue,
            on_click: self.on_click,
            on_confirm: self.on_confirm,
        })
    }
}

impl DoubleConfirmButton {
    /// Start configuring a double-confirm button.
    pub fn builder() -> DoubleConfirmBuilder {
        DoubleConfirmBuilder::default()
    }

    /// Current state.
    pub fn state(&self) -> ConfirmState {
        self.state
    }

    /// Whether a first action is pending.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, ConfirmState::Armed { .. })
    }

    fn expired(&self, now: u64) -> bool {
        match self.state {
            ConfirmState::Armed { since } => now.saturating_sub(since) > self.window,
            ConfirmState::Idle => false,
        }
    }

    fn secondary(&mut self, event: &ClickEvent, ctx: &mut Context<'_>) {
        let now = ctx.tick();
        if let Some(cue) = &self.cue {
            ctx.play_cue(cue.clone());
        }
        if self.is_armed() && !self.expired(now) {
            self.state = ConfirmState::Idle;
            self.render(ctx);
            if let Some(callback) = self.on_confirm.as_mut() {
                callback(event, ctx);
            }
            return;
        }
        self.state = ConfirmState::Armed { since: now };
        self.render(ctx);
    }
}

impl Component for DoubleConfirmButton {
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
        let source = if self.is_armed() {
            &self.confirm
        } else {
            &self.primary
        };
        fill(self.size, &source.resolve(ctx))
    }

    fn on_click(&mut self, event: &ClickEvent, ctx: &mut Context<'_>) {
        if !self.is_interactable() {
            return;
        }
        if event.kind.is_secondary() {
            self.secondary(event, ctx);
        } else if let Some(callback) = self.on_click.as_mut() {
            callback(event, ctx);
        }
    }

    fn refresh_interval(&self) -> Option<u32> {
        self.is_armed().then_some(1)
    }

    fn refresh(&mut self, ctx: &Context<'_>) -> bool {
        if self.expired(ctx.tick()) {
            self.state = ConfirmState::Idle;
            return true;
        }
        false
    }

    fn on_detach(&mut self, _ctx: &mut Context<'_>) {
        self.state = ConfirmState::Idle;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for DoubleConfirmButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleConfirmButton")
            .field("base", &self.base)
            .field("size", &self.size)
            .field("window", &self.window)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DoubleConfirmBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleConfirmBuilder")
            .field("id", &self.id)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
