//! Shared utilities for the Atrio chat/streaming server.
//!
//! Contains the concerns every binary needs regardless of role:
//! time handling with a clock abstraction, and logging setup.

pub mod logger;
pub mod time;
