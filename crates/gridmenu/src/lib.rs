#![forbid(unsafe_code)]

//! gridmenu public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a lightweight
//! prelude for building panels.
//!
//! ```ignore
//! use gridmenu::prelude::*;
//!
//! let toggle = Toggle::builder()
//!     .on_content(Content::new("lime_dye").label("On"))
//!     .off_content(Content::new("gray_dye").label("Off"))
//!     .build()?;
//! let root = Grid::builder().size(9, 3).child(13, toggle).build()?;
//! let mut runtime = Runtime::new(MemoryHost::new());
//! runtime.open(ActorId::new("steve"), "Settings", root);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use gridmenu_core::{
    ActorId, Cell, ClickEvent, ClickKind, Content, Cue, Direction, Error, Result, Size, Slot,
};

// --- Component re-exports --------------------------------------------------

pub use gridmenu_widgets::confirmation::{Confirmation, ConfirmationPanel};
pub use gridmenu_widgets::{
    Button, Component, ComponentBase, ComponentKey, ConfirmState, Context, ContentSource,
    DoubleConfirmButton, Grid, Icon, Items, PanelId, ProgressBar, Request, SelectionChange,
    Selector, Slots, Surface, Toggle, ToggleEvent,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use gridmenu_runtime::{
    ClickOutcome, GridId, Host, MemoryHost, Panel, Runtime, RuntimeConfig, TickReport,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActorId, Button, Cell, ClickEvent, ClickKind, Component, ConfirmationPanel, Content,
        Context, Cue, Direction, DoubleConfirmButton, Error, Grid, Icon, ProgressBar, Result,
        Selector, Size, Toggle,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{ClickOutcome, Host, MemoryHost, Runtime, RuntimeConfig};

    pub use crate::{core, widgets};
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use gridmenu_core as core;
#[cfg(feature = "runtime")]
pub use gridmenu_runtime as runtime;
pub use gridmenu_widgets as widgets;
