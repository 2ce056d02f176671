use crate::features::TrailsState;
use crate::models::{Trail, TrailId};
use crate::store::StoreError;

#[derive(Debug, Clone, Copy)]
pub struct GetTrailQuery {
    pub id: TrailId,
}

#[derive(Debug, thiserror::Error)]
pub enum GetTrailError {
    #[error("Trail {0} not found")]
    NotFound(TrailId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip(state))]
pub async fn handle(state: &TrailsState, query: GetTrailQuery) -> Result<Trail, GetTrailError> {
    state
        .store
        .get(query.id)
        .await?
        .ok_or(GetTrailError::NotFound(query.id))
}
