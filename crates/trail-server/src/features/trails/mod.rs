//! Trail feature slice
//!
//! - `commands/` - create, update, delete (authenticated)
//! - `queries/` - list, get (public)
//! - `routes.rs` - HTTP wiring and status-code mapping
//! - `types.rs` - request payloads and client-facing messages

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::trails_routes;
