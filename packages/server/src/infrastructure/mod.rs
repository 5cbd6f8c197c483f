//! Infrastructure layer: concrete implementations of the domain's trait
//! seams, plus the wire-level DTOs.

pub mod dto;
pub mod pusher;
pub mod repository;
pub mod token;
