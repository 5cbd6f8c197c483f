//! Persistence implementations.
//!
//! The in-memory store backs tests and demo deployments; production
//! deployments plug a database-backed implementation into the same
//! `ChatRepository` trait.

pub mod inmemory;

pub use inmemory::InMemoryChatRepository;
