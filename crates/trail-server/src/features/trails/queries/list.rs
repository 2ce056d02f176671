use crate::features::TrailsState;
use crate::models::Trail;
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListTrailsQuery;

#[derive(Debug, thiserror::Error)]
pub enum ListTrailsError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Every trail in the detail view, unpaginated
#[tracing::instrument(skip_all)]
pub async fn handle(state: &TrailsState, _query: ListTrailsQuery) -> Result<Vec<Trail>, ListTrailsError> {
    let trails = state.store.list().await?;
    tracing::debug!(count = trails.len(), "Trails listed");
    Ok(trails)
}
