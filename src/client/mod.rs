//! Request dispatch and the driving loop.
//!
//! This module turns URLs into registered in-flight connections and runs
//! the single-threaded loop that completes them: dequeue one pending
//! request, poll for readiness, read whatever arrived, and deliver finished
//! responses to their handlers.

pub mod connection;
pub mod session;

pub use connection::{Handler, InFlight, ReadOutcome};
pub use session::Session;
