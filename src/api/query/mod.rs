//! Search query pipeline
//!
//! Debounced, deduplicated, switch-latest search over a lookup backend

pub mod coalescer;
pub mod result;

pub use coalescer::{QueryCoalescer, SearchBackend};
pub use result::{ResultSet, ResultStream};
