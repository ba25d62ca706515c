#![forbid(unsafe_code)]

//! Content providers.

use std::fmt;

use gridmenu_core::Content;

use crate::context::Context;

/// Where a widget's content comes from.
pub enum ContentSource {
    /// The same content every render.
    Fixed(Content),
    /// Computed from the context on every render. The context origin is the
    /// widget's own top-left cell, whether the widget renders alone or
    /// inside a container's merged items.
    Dynamic(Box<dyn Fn(&Context<'_>) -> Content>),
}

impl ContentSource {
    /// Wrap a function of the context.
    pub fn dynamic(f: impl Fn(&Context<'_>) -> Content + 'static) -> Self {
        Self::Dynamic(Box::new(f))
    }

    /// Produce the content for this render.
    pub fn resolve(&self, ctx: &Context<'_>) -> Content {
        match self {
            Self::Fixed(content) => content.clone(),
            Self::Dynamic(f) => f(ctx),
        }
    }

    /// Whether the content depends on the context.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

impl From<Content> for ContentSource {
    fn from(content: Content) -> Self {
        Self::Fixed(content)
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(content) => f.debug_tuple("Fixed").field(content).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use gridmenu_core::Size;

    #[test]
    fn dynamic_sees_the_tick() {
        let mut harness = Harness::new(Size::ONE);
        harness.tick = 42;
        let source = ContentSource::dynamic(|ctx| Content::new("clock").label(ctx.tick().to_string()));
        let fixed = ContentSource::from(Content::new("stone"));
        let ctx = harness.ctx();
        assert_eq!(source.resolve(&ctx).label_text(), Some("42"));
        assert_eq!(fixed.resolve(&ctx), Content::new("stone"));
        assert!(source.is_dynamic());
        assert!(!fixed.is_dynamic());
    }
}
