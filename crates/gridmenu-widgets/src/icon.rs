#![forbid(unsafe_code)]

//! Static, non-interactive content.

use std::any::Any;

use gridmenu_core::{Content, Error, Result, Size};

use crate::context::Context;
use crate::source::ContentSource;
use crate::{checked_size, fill, Component, ComponentBase, Items};

/// Shows the same content in every cell it covers. Clicks do nothing.
#[derive(Debug)]
pub struct Icon {
    base: ComponentBase,
    size: Size,
    content: ContentSource,
}

/// Configuration for an [`Icon`].
#[derive(Debug, Default)]
pub struct IconBuilder {
    id: Option<String>,
    size: Option<(u16, u16)>,
    content: Option<ContentSource>,
}

impl IconBuilder {
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

    /// Fixed content.
    #[must_use]
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Content computed on each render.
    #[must_use]
    pub fn content_with(mut self, f: impl Fn(&Context<'_>) -> Content + 'static) -> Self {
        self.content = Some(ContentSource::dynamic(f));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Icon> {
        Ok(Icon {
            base: ComponentBase::new(self.id),
            size: checked_size(self.size)?,
            content: self.content.ok_or(Error::MissingContent("icon content"))?,
        })
    }
}

impl Icon {
    /// Start configuring an icon.
    pub fn builder() -> IconBuilder {
        IconBuilder::default()
    }

    /// Replace the content. Takes effect on the next render.
    pub fn set_content(&mut self, content: impl Into<ContentSource>) {
        self.content = content.into();
    }
}

impl Component for Icon {
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
        fill(self.size, &self.content.resolve(ctx))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
