//! Normalized result of a wrapped remote call

/// Outcome of a remote operation passed through the resilient wrapper
///
/// A failure still carries a value of the operation's result type, so a
/// caller can always proceed with *something*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    Success(T),
    Failure {
        /// Short, human-readable failure message
        reason: String,
        /// Safe substitute for the value the call would have produced
        fallback: T,
    },
}

impl<T> CallOutcome<T> {
    pub fn success(value: T) -> Self {
        CallOutcome::Success(value)
    }

    pub fn failure(reason: impl Into<String>, fallback: T) -> Self {
        CallOutcome::Failure {
            reason: reason.into(),
            fallback,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The usable value: the real result or the fallback
    pub fn value(&self) -> &T {
        match self {
            CallOutcome::Success(value) => value,
            CallOutcome::Failure { fallback, .. } => fallback,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            CallOutcome::Success(value) => value,
            CallOutcome::Failure { fallback, .. } => fallback,
        }
    }

    /// Failure message, if the call failed
    pub fn reason(&self) -> Option<&str> {
        match self {
            CallOutcome::Success(_) => None,
            CallOutcome::Failure { reason, .. } => Some(reason),
        }
    }
}
