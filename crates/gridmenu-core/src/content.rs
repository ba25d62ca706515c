#![forbid(unsafe_code)]

//! Opaque cell content and feedback cues.
//!
//! [`Content`] is what a component puts into a host cell. The framework only
//! clones and compares it; the host decides how a `kind`/`label`/`amount`
//! triple is displayed.

use std::fmt;
use std::sync::Arc;

/// A value written into one host grid cell.
///
/// Cheap to clone: strings are reference counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Content {
    kind: Arc<str>,
    label: Option<Arc<str>>,
    amount: u8,
}

impl Content {
    /// Create content of the given kind with no label and an amount of 1.
    pub fn new(kind: impl Into<Arc<str>>) -> Self {
        Self {
            kind: kind.into(),
            label: None,
            amount: 1,
        }
    }

    /// Attach a display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the stack amount (at least 1).
    #[must_use]
    pub fn amount(mut self, amount: u8) -> Self {
        self.amount = amount.max(1);
        self
    }

    /// Host-defined kind identifier.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Display label, if any.
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Stack amount.
    pub fn count(&self) -> u8 {
        self.amount
    }
}

impl From<&str> for Content {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for Content {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}")?,
            None => write!(f, "{}", self.kind)?,
        }
        if self.amount > 1 {
            write!(f, " x{}", self.amount)?;
        }
        Ok(())
    }
}

/// A feedback cue (typically a sound) the host plays for the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cue(Arc<str>);

impl Cue {
    /// Cue played by toggles and selectors unless configured otherwise.
    pub const CLICK: &'static str = "ui.button.click";

    /// Create a cue from its host identifier.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The standard click cue.
    pub fn click() -> Self {
        Self::new(Self::CLICK)
    }

    /// Host identifier of this cue.
    pub fn name(&self) -> &str {
        &self.0
    }
}
