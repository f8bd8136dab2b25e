//! HTTP API over the [`Desk`](crate::desk::Desk).
//!
//! Authentication happens upstream; the gateway forwards the viewer's roles
//! in request headers (see [`viewer`]).
mod gateway;
mod server;

pub use gateway::*;
pub use server::*;
