//! Feature modules implementing the trail API
//!
//! Each feature is a vertical slice with its own commands, queries, and
//! routes. Handlers receive their collaborators through [`TrailsState`]
//! rather than globals, so tests can swap the store and the identity
//! gateway for fakes.

pub mod trails;

use axum::Router;
use std::sync::Arc;

use crate::auth::{AuthGateway, AuthPolicy};
use crate::store::TrailStore;

/// Shared state for the trail routes
#[derive(Clone)]
pub struct TrailsState {
    pub store: Arc<dyn TrailStore>,
    pub auth: Arc<dyn AuthGateway>,
    pub policy: AuthPolicy,
}

impl TrailsState {
    pub fn new(store: Arc<dyn TrailStore>, auth: Arc<dyn AuthGateway>, policy: AuthPolicy) -> Self {
        Self {
            store,
            auth,
            policy,
        }
    }
}

/// Creates the router with all feature routes mounted
pub fn router(state: TrailsState) -> Router<()> {
    Router::new().merge(trails::trails_routes().with_state(state))
}
