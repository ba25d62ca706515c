#![forbid(unsafe_code)]

//! Tick-driven refresh scheduling.
//!
//! Components declare a refresh interval in ticks. The scheduler keeps one
//! countdown per `(panel, component)` pair and reports the pairs that are due
//! on each [`RefreshScheduler::advance`]. A fresh registration first fires a
//! full interval after it was made.
//!
//! Registrations are kept in sync with the component tree through
//! [`RefreshScheduler::reconcile`]: pairs no longer declared are dropped,
//! unchanged pairs keep their countdown, and new pairs are appended.

use gridmenu_widgets::{ComponentKey, PanelId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    panel: PanelId,
    key: ComponentKey,
    interval: u32,
    remaining: u32,
}

/// Countdown table of periodic refreshes.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    entries: Vec<Entry>,
}

impl RefreshScheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is registered under `panel`.
    pub fn is_registered(&self, panel: PanelId, key: ComponentKey) -> bool {
        self.entry(panel, key).is_some()
    }

    /// Ticks left before `key` under `panel` fires.
    pub fn remaining(&self, panel: PanelId, key: ComponentKey) -> Option<u32> {
        self.entry(panel, key).map(|e| e.remaining)
    }

    /// Registrations of one panel, in registration order.
    pub fn registrations(&self, panel: PanelId) -> Vec<(ComponentKey, u32)> {
        self.entries
            .iter()
            .filter(|e| e.panel == panel)
            .map(|e| (e.key, e.interval))
            .collect()
    }

    fn entry(&self, panel: PanelId, key: ComponentKey) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.panel == panel && e.key == key)
    }

    /// Make `panel`'s registrations match `declared`.
    ///
    /// An entry whose interval changed restarts its countdown. Zero intervals
    /// are ignored.
    pub fn reconcile(&mut self, panel: PanelId, declared: &[(ComponentKey, u32)]) {
        let before = self.entries.len();
        tracing::trace!(
            panel = panel.raw(),
            declared = declared.len(),
            active_before = before,
            "refresh reconcile starting"
        );

        self.entries.retain_mut(|entry| {
            if entry.panel != panel {
                return true;
            }
            match declared.iter().find(|(key, _)| *key == entry.key) {
                Some(&(_, interval)) if interval > 0 => {
                    if interval != entry.interval {
                        tracing::debug!(
                            panel = panel.raw(),
                            component = entry.key.get(),
                            from = entry.interval,
                            to = interval,
                            "refresh interval changed"
                        );
                        entry.interval = interval;
                        entry.remaining = interval;
                    }
                    true
                }
                _ => {
                    tracing::debug!(
                        panel = panel.raw(),
                        component = entry.key.get(),
                        "stopping refresh"
                    );
                    false
                }
            }
        });

        for &(key, interval) in declared {
            if interval == 0 || self.is_registered(panel, key) {
                continue;
            }
            tracing::debug!(
                panel = panel.raw(),
                component = key.get(),
                interval,
                "starting refresh"
            );
            self.entries.push(Entry {
                panel,
                key,
                interval,
                remaining: interval,
            });
        }

        tracing::trace!(
            panel = panel.raw(),
            active_before = before,
            active_after = self.entries.len(),
            "refresh reconcile complete"
        );
    }

    /// Drop every registration of `panel`. Returns how many were dropped.
    pub fn cancel_panel(&mut self, panel: PanelId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.panel != panel);
        let cancelled = before - self.entries.len();
        if cancelled > 0 {
            tracing::debug!(panel = panel.raw(), cancelled, "refreshes cancelled");
        }
        cancelled
    }

    /// Advance one tick and return the pairs that are due, in registration
    /// order. Due pairs restart their countdown.
    pub fn advance(&mut self) -> Vec<(PanelId, ComponentKey)> {
        let mut due = Vec::new();
        for entry in &mut self.entries {
            entry.remaining = entry.remaining.saturating_sub(1);
            if entry.remaining == 0 {
                entry.remaining = entry.interval;
                due.push((entry.panel, entry.key));
            }
        }
        due
    }
}
