//! Credential verification implementations.
//!
//! Currently a single JWT (HS256) implementation of the domain's
//! `TokenVerifier` trait.

pub mod jwt;

pub use jwt::JwtTokenVerifier;
