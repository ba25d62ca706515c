#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! Defaults suit a live host. [`RuntimeConfig::from_env`] lets an operator
//! flip individual switches without a rebuild:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `GRIDMENU_CATCH_PANICS` | `catch_panics` | `true` |
//! | `GRIDMENU_RECONCILE_ON_TICK` | `reconcile_on_tick` | `true` |
//! | `GRIDMENU_RELEASE_CHAIN_ON_CLOSE` | `release_chain_on_close` | `true` |
//!
//! Values `1`/`true`/`yes`/`on` enable a switch, `0`/`false`/`no`/`off`
//! disable it; anything else keeps the default.

use std::env;

/// Environment variable for [`RuntimeConfig::catch_panics`].
pub const CATCH_PANICS_ENV: &str = "GRIDMENU_CATCH_PANICS";
/// Environment variable for [`RuntimeConfig::reconcile_on_tick`].
pub const RECONCILE_ON_TICK_ENV: &str = "GRIDMENU_RECONCILE_ON_TICK";
/// Environment variable for [`RuntimeConfig::release_chain_on_close`].
pub const RELEASE_CHAIN_ENV: &str = "GRIDMENU_RELEASE_CHAIN_ON_CLOSE";

/// Switches controlling the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Catch panics raised by component code at dispatch, render and refresh
    /// boundaries and report them instead of unwinding into the host.
    pub catch_panics: bool,
    /// Re-read every shown panel's refresh declarations at the start of each
    /// tick, so visibility changes made outside a click take effect.
    pub reconcile_on_tick: bool,
    /// When a panel closes, release every other panel of the same user
    /// instead of keeping them for a later reopen.
    pub release_chain_on_close: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catch_panics: true,
            reconcile_on_tick: true,
            release_chain_on_close: true,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|value| parse_flag(&value))
                .unwrap_or(default)
        };
        Self {
            catch_panics: flag(CATCH_PANICS_ENV, defaults.catch_panics),
            reconcile_on_tick: flag(RECONCILE_ON_TICK_ENV, defaults.reconcile_on_tick),
            release_chain_on_close: flag(RELEASE_CHAIN_ENV, defaults.release_chain_on_close),
        }
    }

    /// Set [`Self::catch_panics`].
    #[must_use]
    pub fn with_catch_panics(mut self, enabled: bool) -> Self {
        self.catch_panics = enabled;
        self
    }

    /// Set [`Self::reconcile_on_tick`].
    #[must_use]
    pub fn with_reconcile_on_tick(mut self, enabled: bool) -> Self {
        self.reconcile_on_tick = enabled;
        self
    }

    /// Set [`Self::release_chain_on_close`].
    #[must_use]
    pub fn with_release_chain_on_close(mut self, enabled: bool) -> Self {
        self.release_chain_on_close = enabled;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if ["1", "true", "yes", "on"]
        .iter()
        .any(|v| value.eq_ignore_ascii_case(v))
    {
        Some(true)
    } else if ["0", "false", "no", "off"]
        .iter()
        .any(|v| value.eq_ignore_ascii_case(v))
    {
        Some(false)
    } else {
        None
    }
}
