#![forbid(unsafe_code)]

//! Core: grid geometry, opaque cell content, click events, and logging.

pub mod content;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;

pub use content::{Content, Cue};
pub use error::{Error, Result};
pub use event::{ActorId, ClickEvent, ClickKind};
pub use geometry::{Cell, Direction, Size, Slot};

#[cfg(feature = "tracing")]
pub use logging::{trace, trace_span};
