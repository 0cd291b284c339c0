//! Failure containment for remote calls
//!
//! Provides the call outcome type, the fallback policy, the diagnostic
//! channel and the wrapper tying them together.

pub mod diagnostics;
pub mod fallback;
pub mod outcome;
pub mod wrapper;

pub use diagnostics::{DiagnosticSink, FailureReport, LogDiagnostics, RecordingDiagnostics};
pub use fallback::{Recovery, recover};
pub use outcome::CallOutcome;
pub use wrapper::ResilientCaller;
