#![forbid(unsafe_code)]

//! Two-state switch.
//!
//! A click on an interactable toggle flips its state, plays the configured
//! cue, re-renders the toggle's cells, and then invokes the callback with the
//! new state. Clicks on a hidden or disabled toggle change nothing.

use std::any::Any;
use std::fmt;

use gridmenu_core::{ClickEvent, Content, Cue, Error, Result, Size};

use crate::context::Context;
use crate::source::ContentSource;
use crate::{checked_size, fill, Component, ComponentBase, Items};

/// Payload for the state-changed callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEvent {
    /// The click that caused the change.
    pub click: ClickEvent,
    /// State after the flip.
    pub new_state: bool,
}

type ToggleCallback = Box<dyn FnMut(&ToggleEvent, &mut Context<'_>)>;

/// A switch between an "on" and an "off" content.
pub struct Toggle {
    base: ComponentBase,
    size: Size,
    state: bool,
    on: ContentSource,
    off: ContentSource,
    cue: Option<Cue>,
    on_toggle: Option<ToggleCallback>,
}

/// Configuration for a [`Toggle`].
pub struct ToggleBuilder {
    id: Option<String>,
    size: Option<(u16, u16)>,
    state: bool,
    on: Option<ContentSource>,
    off: Option<ContentSource>,
    cue: Option<Cue>,
    on_toggle: Option<ToggleCallback>,
}

impl Default for ToggleBuilder {
    fn default() -> Self {
        Self {
            id: None,
            size: None,
            state: false,
            on: None,
            off: None,
            cue: Some(Cue::click()),
            on_toggle: None,
        }
    }
}

impl ToggleBuilder {
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

    /// Content shown while on.
    #[must_use]
    pub fn on_content(mut self, content: Content) -> Self {
        self.on = Some(content.into());
        self
    }

    /// Content shown while on, computed per render.
    #[must_use]
    pub fn on_content_with(mut self, f: impl Fn(&Context<'_>) -> Content + 'static) -> Self {
        self.on = Some(ContentSource::dynamic(f));
        self
    }

    /// Content shown while off.
    #[must_use]
    pub fn off_content(mut self, content: Content) -> Self {
        self.off = Some(content.into());
        self
    }

    /// Content shown while off, computed per render.
    #[must_use]
    pub fn off_content_with(mut self, f: impl Fn(&Context<'_>) -> Content + 'static) -> Self {
        self.off = Some(ContentSource::dynamic(f));
        self
    }

    /// State before the first click (defaults to off).
    #[must_use]
    pub fn initial_state(mut self, state: bool) -> Self {
        self.state = state;
        self
    }

    /// Cue played on each flip (`None` for silence).
    #[must_use]
    pub fn cue(mut self, cue: Option<Cue>) -> Self {
        self.cue = cue;
        self
    }

    /// Called after each flip.
    #[must_use]
    pub fn on_toggle(mut self, f: impl FnMut(&ToggleEvent, &mut Context<'_>) + 'static) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Toggle> {
        Ok(Toggle {
            base: ComponentBase::new(self.id),
            size: checked_size(self.size)?,
            state: self.state,
            on: self.on.ok_or(Error::MissingContent("toggle on content"))?,
            off: self.off.ok_or(Error::MissingContent("toggle off content"))?,
            cue: self.cue,
            on_toggle: self.on_toggle,
        })
    }
}

impl Toggle {
    /// Start configuring a toggle.
    pub fn builder() -> ToggleBuilder {
        ToggleBuilder::default()
    }

    /// Current state.
    pub fn state(&self) -> bool {
        self.state
    }

    /// Set the state without firing the callback. Takes effect on the next
    /// render.
    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    fn current(&self) -> &ContentSource {
        if self.state { &self.on } else { &self.off }
    }
}

impl Component for Toggle {
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
        fill(self.size, &self.current().resolve(ctx))
    }

    fn on_click(&mut self, event: &ClickEvent, ctx: &mut Context<'_>) {
        if !self.is_interactable() {
            return;
        }
        self.state = !self.state;
        if let Some(cue) = &self.cue {
            ctx.play_cue(cue.clone());
        }
        self.render(ctx);

        if let Some(callback) = self.on_toggle.as_mut() {
            let change = ToggleEvent {
                click: event.clone(),
                new_state: self.state,
            };
            callback(&change, ctx);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toggle")
            .field("base", &self.base)
            .field("size", &self.size)
            .field("state", &self.state)
            .field("cue", &self.cue)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ToggleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleBuilder")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
