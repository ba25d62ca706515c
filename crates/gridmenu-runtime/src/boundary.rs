#![forbid(unsafe_code)]

//! Panic boundary around component code.
//!
//! Handlers, renders and refreshes are user code. A panic in one of them is
//! caught here, turned into a [`CapturedPanic`], and reported by the runtime
//! so the host loop keeps running.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// A panic caught at a dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPanic {
    /// Panic payload rendered as text.
    pub message: String,
}

impl CapturedPanic {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let mut message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        if let Some(stripped) = message.strip_prefix("internal error: entered unreachable code: ") {
            message = stripped.to_string();
        }
        Self { message }
    }
}

impl fmt::Display for CapturedPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Run `f`, catching a panic when `enabled`.
///
/// With `enabled == false` a panic propagates to the caller unchanged.
pub fn guard<R>(enabled: bool, f: impl FnOnce() -> R) -> Result<R, CapturedPanic> {
    if !enabled {
        return Ok(f());
    }
    catch_unwind(AssertUnwindSafe(f)).map_err(CapturedPanic::from_payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_values_through() {
        assert_eq!(guard(true, || 7), Ok(7));
        assert_eq!(guard(false, || "ok"), Ok("ok"));
    }

    #[test]
    fn captures_str_and_string_payloads() {
        let err = guard(true, || -> u8 { panic!("boom") }).unwrap_err();
        assert_eq!(err.message, "boom");

        let err = guard(true, || -> u8 { panic!("{} {}", "formatted", 3) }).unwrap_err();
        assert_eq!(err.to_string(), "formatted 3");
    }

    #[test]
    fn strips_unreachable_prefix() {
        let err = guard(true, || -> u8 { unreachable!("bad state") }).unwrap_err();
        assert_eq!(err.message, "bad state");
    }

    #[test]
    fn unknown_payloads_get_placeholder() {
        let err = guard(true, || -> u8 { std::panic::panic_any(42_u8) }).unwrap_err();
        assert_eq!(err.message, "unknown panic");
    }

    #[test]
    #[should_panic(expected = "through")]
    fn disabled_guard_propagates() {
        let _ = guard(false, || -> u8 { panic!("through") });
    }
}
