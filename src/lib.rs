//! Courier - Minimal Non-Blocking HTTP Client
//!
//! Core library for readiness-polled HTTP fetching.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mux;
