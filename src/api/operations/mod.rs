//! Hero operations
//!
//! Describes each request the client can make, independent of how it is
//! sent or how its failures are handled.

pub mod operation;

pub use operation::Operation;
