//! JSON responder API server library.
//!
//! Exposes the building blocks (config, state, rendering strategy, routes,
//! router) so integration tests and the binary entrypoint can both access
//! them.

pub mod config;
pub mod error;
pub mod render;
pub mod responder;
pub mod router;
pub mod routes;
pub mod state;
