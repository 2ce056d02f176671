//! Trail Server Library
//!
//! HTTP service for managing hiking trails backed by PostgreSQL.
//!
//! # Architecture
//!
//! Requests follow a CQRS split:
//!
//! - **Commands** (create, update, delete) verify the caller against the
//!   university identity service before touching storage
//! - **Queries** (list, get) are public
//!
//! Storage and identity verification sit behind the [`store::TrailStore`]
//! and [`auth::AuthGateway`] traits, both carried in
//! [`features::TrailsState`].
//!
//! # Example
//!
//! ```no_run
//! use trail_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod features;
pub mod middleware;
pub mod models;
pub mod normalize;
pub mod store;

pub use config::Config;
pub use features::TrailsState;
pub use models::{Trail, TrailFields, TrailId};
