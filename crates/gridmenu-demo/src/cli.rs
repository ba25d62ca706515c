#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `GRIDMENU_DEMO_*` prefix.

use std::env;
use std::process;

use gridmenu::ClickKind;

use crate::panels::PanelKind;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
gridmenu demo: scripted grid panels on an in-memory host

USAGE:
    gridmenu-demo [OPTIONS]

OPTIONS:
    --panel=NAME     Panel to open: 'basic' (default), 'previous' or 'confirm'
    --actor=NAME     Acting user (default: steve)
    --script=STEPS   Comma-separated steps, run in order
    --ticks=N        Ticks to run after the script (default: 0)
    --json-log       Log as JSON lines on stderr
    --help, -h       Show this help message
    --version, -V    Show version

STEPS:
    click:SLOT[:KIND]   Click a slot. KIND is one of left (default), right,
                        shift-left, shift-right, middle, double, drop,
                        control-drop, swap, key1..key9
    tick[:N]            Run N ticks (default 1)
    close               Close the grid from the host side

ENVIRONMENT VARIABLES:
    GRIDMENU_DEMO_PANEL    Override --panel
    GRIDMENU_DEMO_ACTOR    Override --actor
    GRIDMENU_DEMO_SCRIPT   Override --script
    GRIDMENU_DEMO_TICKS    Override --ticks
    GRIDMENU_LOG           Log filter (default: info)";

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Click a slot of the actor's open grid.
    Click {
        /// Absolute slot.
        slot: usize,
        /// Click kind.
        kind: ClickKind,
    },
    /// Run this many ticks.
    Tick(u64),
    /// Host-side close of the actor's open grid.
    Close,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Panel to open.
    pub panel: PanelKind,
    /// Acting user.
    pub actor: String,
    /// Scripted steps.
    pub script: Vec<Step>,
    /// Ticks run after the script.
    pub ticks: u64,
    /// JSON log output.
    pub json_log: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            panel: PanelKind::Basic,
            actor: "steve".into(),
            script: Vec::new(),
            ticks: 0,
            json_log: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
pub enum Parsed {
    /// Run the demo.
    Run(Opts),
    /// Print help and exit.
    Help,
    /// Print the version and exit.
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version` and invalid input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("gridmenu-demo {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `lookup`.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from(
        args: &[String],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, String> {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = lookup("GRIDMENU_DEMO_PANEL") {
            opts.panel = val.parse()?;
        }
        if let Some(val) = lookup("GRIDMENU_DEMO_ACTOR") {
            opts.actor = val;
        }
        if let Some(val) = lookup("GRIDMENU_DEMO_SCRIPT") {
            opts.script = parse_script(&val)?;
        }
        if let Some(val) = lookup("GRIDMENU_DEMO_TICKS")
            && let Ok(n) = val.parse()
        {
            opts.ticks = n;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--json-log" => opts.json_log = true,
                other => {
                    if let Some(val) = other.strip_prefix("--panel=") {
                        opts.panel = val.parse()?;
                    } else if let Some(val) = other.strip_prefix("--actor=") {
                        opts.actor = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--script=") {
                        opts.script = parse_script(val)?;
                    } else if let Some(val) = other.strip_prefix("--ticks=") {
                        opts.ticks = val
                            .parse()
                            .map_err(|_| format!("Invalid --ticks value: {val}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Parsed::Run(opts))
    }
}

/// Parse a comma-separated step list.
pub fn parse_script(script: &str) -> Result<Vec<Step>, String> {
    script
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(step: &str) -> Result<Step, String> {
    let mut parts = step.split(':');
    match parts.next() {
        Some("click") => {
            let slot = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| format!("Invalid click step: {step}"))?;
            let kind = match parts.next() {
                Some(kind) => parse_kind(kind)?,
                None => ClickKind::Left,
            };
            Ok(Step::Click { slot, kind })
        }
        Some("tick") => match parts.next() {
            Some(n) => n
                .parse()
                .map(Step::Tick)
                .map_err(|_| format!("Invalid tick step: {step}")),
            None => Ok(Step::Tick(1)),
        },
        Some("close") => Ok(Step::Close),
        _ => Err(format!("Unknown step: {step}")),
    }
}

fn parse_kind(kind: &str) -> Result<ClickKind, String> {
    let parsed = match kind {
        "left" => ClickKind::Left,
        "right" => ClickKind::Right,
        "shift-left" => ClickKind::ShiftLeft,
        "shift-right" => ClickKind::ShiftRight,
        "middle" => ClickKind::Middle,
        "double" => ClickKind::DoubleClick,
        "drop" => ClickKind::Drop,
        "control-drop" => ClickKind::ControlDrop,
        "swap" => ClickKind::SwapOffhand,
        other => match other.strip_prefix("key").and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=9) => ClickKind::NumberKey(n - 1),
            _ => return Err(format!("Unknown click kind: {other}")),
        },
    };
    Ok(parsed)
}
