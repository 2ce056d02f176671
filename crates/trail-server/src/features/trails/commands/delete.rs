use serde::Serialize;

use crate::auth::{authorize, AuthError, Credential, DeleteAuth};
use crate::features::TrailsState;
use crate::models::TrailId;
use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct DeleteTrailCommand {
    pub id: TrailId,
    pub credential: Option<Credential>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteTrailResponse {
    pub trail_id: TrailId,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteTrailError {
    #[error("Authentication required. Please provide Email and Password.")]
    MissingCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Delete a trail
///
/// There is no existence pre-check: deleting an unknown id succeeds.
#[tracing::instrument(skip_all, fields(trail_id = command.id, policy = %state.policy.kind()))]
pub async fn handle(
    state: &TrailsState,
    command: DeleteTrailCommand,
) -> Result<DeleteTrailResponse, DeleteTrailError> {
    let credential = command.credential.filter(|c| !c.is_absent());

    match (credential, state.policy.delete_auth()) {
        (Some(credential), _) => authorize(state.auth.as_ref(), &credential).await?,
        (None, DeleteAuth::Required) => return Err(DeleteTrailError::MissingCredentials),
        (None, DeleteAuth::Optional) => {
            tracing::info!("Deleting without credentials");
        },
    }

    state.store.delete(command.id).await?;

    tracing::info!("Trail deleted");

    Ok(DeleteTrailResponse {
        trail_id: command.id,
    })
}
