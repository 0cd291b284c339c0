//! Fallback policy for failed operations
//!
//! Pure mapping from a failure to the value the caller receives instead and
//! the line the user sees. No logging or I/O happens here; the wrapper acts
//! on the returned `Recovery`.

use super::outcome::CallOutcome;

/// What to hand back, and what to tell the user, after a failed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery<T> {
    pub reason: String,
    pub log_line: String,
    pub fallback: T,
}

impl<T> Recovery<T> {
    pub fn into_outcome(self) -> CallOutcome<T> {
        CallOutcome::Failure {
            reason: self.reason,
            fallback: self.fallback,
        }
    }
}

/// Map a failed operation to its fallback value and user-facing log line
///
/// The reason is the error's top-level message only; the full chain belongs
/// to the diagnostic channel.
pub fn recover<T>(
    service: &str,
    operation: &str,
    error: &anyhow::Error,
    fallback: T,
) -> Recovery<T> {
    let reason = error.to_string();
    Recovery {
        log_line: failure_line(service, operation, &reason),
        reason,
        fallback,
    }
}

pub fn failure_line(service: &str, operation: &str, reason: &str) -> String {
    format!("{}: {} failed: {}", service, operation, reason)
}

pub fn success_line(service: &str, detail: &str) -> String {
    format!("{}: {}", service, detail)
}
