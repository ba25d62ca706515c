#![forbid(unsafe_code)]

//! Scripted showcase of gridmenu panels.
//!
//! The binary opens one of the [`panels`] on an in-memory host, runs the
//! scripted clicks, ticks and closes given on the command line, and prints
//! what the actor sees after each step.

pub mod app;
pub mod cli;
pub mod panels;
