#![forbid(unsafe_code)]

//! Premade yes/no confirmation panel.
//!
//! A 9x3 grid with the "yes" button at slot 11, the explanation at slot 13
//! and the "no" button at slot 15. Each button runs its callback and then,
//! unless disabled, closes the panel.

use gridmenu_core::{ClickEvent, Content, Result};

use crate::context::Context;
use crate::{Button, Grid, Icon};

/// Slot of the "yes" button.
pub const YES_SLOT: usize = 11;
/// Slot of the explanation icon.
pub const INFO_SLOT: usize = 13;
/// Slot of the "no" button.
pub const NO_SLOT: usize = 15;

type Choice = Box<dyn FnMut(&ClickEvent, &mut Context<'_>)>;

/// A built confirmation panel, ready to open.
#[derive(Debug)]
pub struct Confirmation {
    /// Panel title.
    pub title: String,
    /// Root component.
    pub root: Grid,
}

/// Configuration for a yes/no confirmation.
pub struct ConfirmationPanel {
    title: String,
    yes: Content,
    no: Content,
    explanation: Content,
    on_yes: Option<Choice>,
    on_no: Option<Choice>,
    close_on_choice: bool,
}

impl ConfirmationPanel {
    /// Start configuring a confirmation with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            yes: Content::new("lime_dye").label("Yes"),
            no: Content::new("red_dye").label("No"),
            explanation: Content::new("oak_sign").label("This action is irreversible"),
            on_yes: None,
            on_no: None,
            close_on_choice: true,
        }
    }

    /// Content of the "yes" button.
    #[must_use]
    pub fn yes_content(mut self, content: Content) -> Self {
        self.yes = content;
        self
    }

    /// Content of the "no" button.
    #[must_use]
    pub fn no_content(mut self, content: Content) -> Self {
        self.no = content;
        self
    }

    /// Content of the explanation icon.
    #[must_use]
    pub fn explanation(mut self, content: Content) -> Self {
        self.explanation = content;
        self
    }

    /// Called when "yes" is clicked.
    #[must_use]
    pub fn on_yes(mut self, f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static) -> Self {
        self.on_yes = Some(Box::new(f));
        self
    }

    /// Called when "no" is clicked.
    #[must_use]
    pub fn on_no(mut self, f: impl FnMut(&ClickEvent, &mut Context<'_>) + 'static) -> Self {
        self.on_no = Some(Box::new(f));
        self
    }

    /// Whether a choice closes the panel (default `true`).
    #[must_use]
    pub fn close_on_choice(mut self, close: bool) -> Self {
        self.close_on_choice = close;
        self
    }

    /// Build the panel root.
    pub fn build(self) -> Result<Confirmation> {
        let close = self.close_on_choice;
        let yes = choice_button("yes", self.yes, self.on_yes, close)?;
        let no = choice_button("no", self.no, self.on_no, close)?;
        let info = Icon::builder()
            .id("explanation")
            .content(self.explanation)
            .build()?;
        let root = Grid::builder()
            .id("confirmation")
            .size(9, 3)
            .child(YES_SLOT, yes)
            .child(INFO_SLOT, info)
            .child(NO_SLOT, no)
            .build()?;
        Ok(Confirmation {
            title: self.title,
            root,
        })
    }
}

fn choice_button(
    id: &str,
    content: Content,
    mut callback: Option<Choice>,
    close: bool,
) -> Result<Button> {
    Button::builder()
        .id(id)
        .content(content)
        .on_click(move |event, ctx| {
            if let Some(f) = callback.as_mut() {
                f(event, ctx);
            }
            if close {
                ctx.close();
            }
        })
        .build()
}

impl std::fmt::Debug for ConfirmationPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationPanel")
            .field("title", &self.title)
            .field("close_on_choice", &self.close_on_choice)
            .finish_non_exhaustive()
    }
}
