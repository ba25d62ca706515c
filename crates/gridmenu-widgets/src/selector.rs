#![forbid(unsafe_code)]

//! Cycling multi-option selector.
//!
//! Each interactable click advances the selection to the next option,
//! wrapping after the last (`index = (index + 1) % n`), re-renders, and
//! reports the old and new values.

use std::any::Any;
use std::fmt;

use gridmenu_core::{ClickEvent, Content, Cue, Error, Result, Size};

use crate::context::Context;
use crate::source::ContentSource;
use crate::{checked_size, fill, Component, ComponentBase, Items};

/// Payload for the selection-changed callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange<T> {
    /// The click that caused the change.
    pub click: ClickEvent,
    /// Index before the click.
    pub old_index: usize,
    /// Index after the click.
    pub new_index: usize,
    /// Value before the click.
    pub old_value: T,
    /// Value after the click.
    pub new_value: T,
}

type ChangeCallback<T> = Box<dyn FnMut(&SelectionChange<T>, &mut Context<'_>)>;
type DefaultFn<T> = Box<dyn Fn(&Context<'_>) -> T>;

enum DefaultOption<T> {
    Index(usize),
    Value(T),
    With(DefaultFn<T>),
}

/// A component cycling through an ordered, non-empty list of options.
pub struct Selector<T> {
    base: ComponentBase,
    size: Size,
    options: Vec<(ContentSource, T)>,
    index: usize,
    default_with: Option<DefaultFn<T>>,
    cue: Option<Cue>,
    on_change: Option<ChangeCallback<T>>,
}

/// Configuration for a [`Selector`].
pub struct SelectorBuilder<T> {
    id: Option<String>,
    size: Option<(u16, u16)>,
    options: Vec<(ContentSource, T)>,
    default: Option<DefaultOption<T>>,
    cue: Option<Cue>,
    on_change: Option<ChangeCallback<T>>,
}

impl<T> Default for SelectorBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            size: None,
            options: Vec::new(),
            default: None,
            cue: Some(Cue::click()),
            on_change: None,
        }
    }
}

impl<T: Clone + PartialEq + 'static> SelectorBuilder<T> {
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

    /// Append an option with fixed content.
    #[must_use]
    pub fn option(mut self, content: Content, value: T) -> Self {
        self.options.push((content.into(), value));
        self
    }

    /// Append an option whose content is computed per render.
    #[must_use]
    pub fn option_with(
        mut self,
        f: impl Fn(&Context<'_>) -> Content + 'static,
        value: T,
    ) -> Self {
        self.options.push((ContentSource::dynamic(f), value));
        self
    }

    /// Start at the option with this index.
    #[must_use]
    pub fn default_index(mut self, index: usize) -> Self {
        self.default = Some(DefaultOption::Index(index));
        self
    }

    /// Start at the first option holding this value.
    #[must_use]
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(DefaultOption::Value(value));
        self
    }

    /// Pick the starting value when the selector is attached to a panel.
    /// A value matching no option selects the first one.
    #[must_use]
    pub fn default_with(mut self, f: impl Fn(&Context<'_>) -> T + 'static) -> Self {
        self.default = Some(DefaultOption::With(Box::new(f)));
        self
    }

    /// Cue played on each change (`None` for silence).
    #[must_use]
    pub fn cue(mut self, cue: Option<Cue>) -> Self {
        self.cue = cue;
        self
    }

    /// Called after each change.
    #[must_use]
    pub fn on_selection_change(
        mut self,
        f: impl FnMut(&SelectionChange<T>, &mut Context<'_>) + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Selector<T>> {
        if self.options.is_empty() {
            return Err(Error::EmptyOptions);
        }
        let len = self.options.len();
        let mut default_with = None;
        let index = match self.default {
            None => 0,
            Some(DefaultOption::Index(index)) if index < len => index,
            Some(DefaultOption::Index(index)) => {
                return Err(Error::OptionIndexOutOfRange { index, len });
            }
            Some(DefaultOption::Value(value)) => self
                .options
                .iter()
                .position(|(_, v)| *v == value)
                .ok_or(Error::UnknownOption)?,
            Some(DefaultOption::With(f)) => {
                default_with = Some(f);
                0
            }
        };
        Ok(Selector {
            base: ComponentBase::new(self.id),
            size: checked_size(self.size)?,
            options: self.options,
            index,
            default_with,
            cue: self.cue,
            on_change: self.on_change,
        })
    }
}

impl<T: Clone + PartialEq + 'static> Selector<T> {
    /// Start configuring a selector.
    pub fn builder() -> SelectorBuilder<T> {
        SelectorBuilder::default()
    }

    /// Index of the selected option.
    pub fn selected_index(&self) -> usize {
        self.index
    }

    /// Value of the selected option.
    pub fn selected_value(&self) -> &T {
        &self.options[self.index].1
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false`: a selector is never built without options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Select an option without firing the callback. Takes effect on the next
    /// render.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let len = self.options.len();
        if index >= len {
            return Err(Error::OptionIndexOutOfRange { index, len });
        }
        self.index = index;
        Ok(())
    }
}

impl<T: Clone + PartialEq + 'static> Component for Selector<T> {
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
        fill(self.size, &self.options[self.index].0.resolve(ctx))
    }

    fn on_attach(&mut self, ctx: &mut Context<'_>) {
        if let Some(f) = &self.default_with {
            let value = f(&*ctx);
            self.index = self
                .options
                .iter()
                .position(|(_, v)| *v == value)
                .unwrap_or(0);
        }
    }

    fn on_click(&mut self, event: &ClickEvent, ctx: &mut Context<'_>) {
        if !self.is_interactable() {
            return;
        }
        let old_index = self.index;
        self.index = (self.index + 1) % self.options.len();
        if let Some(cue) = &self.cue {
            ctx.play_cue(cue.clone());
        }
        self.render(ctx);

        if let Some(callback) = self.on_change.as_mut() {
            let change = SelectionChange {
                click: event.clone(),
                old_index,
                new_index: self.index,
                old_value: self.options[old_index].1.clone(),
                new_value: self.options[self.index].1.clone(),
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

impl<T> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("base", &self.base)
            .field("size", &self.size)
            .field("options", &self.options.len())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for SelectorBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorBuilder")
            .field("id", &self.id)
            .field("options", &self.options.len())
            .finish_non_exhaustive()
    }
}
