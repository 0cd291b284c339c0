//! Heroes Web API Module
//!
//! A resilient client for the heroes API: CRUD operations that never fail
//! the caller, and a debounced, switch-latest search pipeline on top.

pub mod client;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod operations;
pub mod query;
pub mod resilience;
pub mod service;
pub mod transport;

pub use client::HeroClient;
pub use error::{TransportError, UsageError};
pub use messages::MessageLog;
pub use models::{Hero, HeroId, HeroRef};
pub use operations::Operation;
pub use query::{QueryCoalescer, ResultSet, ResultStream, SearchBackend};
pub use resilience::{
    CallOutcome, DiagnosticSink, FailureReport, LogDiagnostics, RecordingDiagnostics,
    ResilientCaller,
};
pub use service::HeroService;
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
