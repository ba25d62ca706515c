#![forbid(unsafe_code)]

//! Scripted session against an in-memory host.
//!
//! Every step appends to a plain-text transcript: a line describing the
//! step followed by the grid the actor sees afterwards.

use std::rc::Rc;

use gridmenu::prelude::*;
use gridmenu::PanelId;

use crate::cli::{Opts, Step};
use crate::panels::{self, Player};

/// A running demo.
pub struct Session {
    runtime: Runtime<MemoryHost>,
    player: Rc<Player>,
    actor: ActorId,
    root: PanelId,
    transcript: String,
}

impl Session {
    /// Open the requested showcase for the requested actor.
    pub fn open(opts: &Opts, config: RuntimeConfig) -> Result<Self> {
        let player = Rc::new(Player::default());
        let (title, root) = panels::build(opts.panel, &player)?;
        let actor = ActorId::new(opts.actor.as_str());
        let mut runtime = Runtime::with_config(MemoryHost::new(), config);
        let root = runtime.open_boxed(actor.clone(), title, root);
        tracing::info!(panel = ?opts.panel, actor = actor.as_str(), "demo opened");

        let mut session = Self {
            runtime,
            player,
            actor,
            root,
            transcript: String::new(),
        };
        session.note(format!("> open {:?} for {}", opts.panel, session.actor.as_str()));
        session.snapshot();
        Ok(session)
    }

    /// Run one scripted step.
    pub fn step(&mut self, step: Step) {
        match step {
            Step::Click { slot, kind } => {
                let Some(grid) = self.runtime.host().open_grid_for(&self.actor) else {
                    self.note(format!("> click {slot}: no grid open"));
                    return;
                };
                let event = ClickEvent::new(slot, kind, self.actor.clone());
                let outcome = self.runtime.handle_click(grid, event);
                self.note(format!("> click {slot} {kind:?}: {outcome:?}"));
            }
            Step::Tick(count) => {
                let mut fired = 0;
                let mut rendered = 0;
                for _ in 0..count {
                    let report = self.runtime.tick();
                    fired += report.fired;
                    rendered += report.rendered;
                    for (panel, message) in report.failures {
                        self.note(format!("! refresh failed on {panel}: {message}"));
                    }
                }
                let now = self.runtime.current_tick();
                self.note(format!(
                    "> tick x{count} (now {now}): {fired} refreshes, {rendered} re-renders"
                ));
            }
            Step::Close => {
                let Some(grid) = self.runtime.host().open_grid_for(&self.actor) else {
                    self.note("> close: no grid open".to_owned());
                    return;
                };
                // The host closes its grid first, then reports it.
                self.runtime.host_mut().close_grid(grid);
                let managed = self.runtime.handle_close(grid);
                self.note(format!("> close {grid}: managed={managed}"));
            }
        }
        self.snapshot();
    }

    /// Everything written so far.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// The runtime driving the session.
    pub fn runtime(&self) -> &Runtime<MemoryHost> {
        &self.runtime
    }

    /// The simulated player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Panel opened first.
    pub fn root(&self) -> PanelId {
        self.root
    }

    fn note(&mut self, line: String) {
        self.transcript.push_str(&line);
        self.transcript.push('\n');
    }

    fn snapshot(&mut self) {
        let dump = match self.runtime.host().open_grid_for(&self.actor) {
            Some(grid) => self.runtime.host().dump(grid),
            None => "(no grid open)\n".to_owned(),
        };
        self.transcript.push_str(&dump);
    }
}

/// Open the showcase, run the script, then run the trailing ticks.
pub fn run(opts: &Opts, config: RuntimeConfig) -> Result<Session> {
    let mut session = Session::open(opts, config)?;
    for step in &opts.script {
        session.step(*step);
    }
    if opts.ticks > 0 {
        session.step(Step::Tick(opts.ticks));
    }
    Ok(session)
}
