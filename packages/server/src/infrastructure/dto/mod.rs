//! Data transfer objects for the outer surfaces.
//!
//! Domain models never cross the wire directly; these types define the
//! exact JSON the browser client sees.

pub mod http;
pub mod websocket;
