#![forbid(unsafe_code)]

//! Panel runtime: binds component trees to host grids.
//!
//! # Role in gridmenu
//! `gridmenu-runtime` is the event loop side of the framework. It opens
//! host grids for panels, turns host clicks into component dispatch, applies
//! navigation requests, and runs the tick-driven refresh scheduler.
//!
//! # How it fits in the system
//! Components and containers live in `gridmenu-widgets`; this crate never
//! inspects concrete widget types. A host (a game server adapter, the
//! in-memory [`MemoryHost`], the demo binary) implements [`Host`] and calls
//! [`Runtime::handle_click`], [`Runtime::handle_close`] and
//! [`Runtime::tick`] from its own loop.

pub mod boundary;
pub mod config;
pub mod host;
pub mod panel;
pub mod runtime;
pub mod scheduler;

pub use boundary::CapturedPanic;
pub use config::RuntimeConfig;
pub use host::{GridId, Host, HostSurface, MemoryHost};
pub use panel::Panel;
pub use runtime::{ClickOutcome, Runtime, TickReport};
pub use scheduler::RefreshScheduler;
