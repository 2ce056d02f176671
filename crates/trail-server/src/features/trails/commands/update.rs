//! Update trail command
//!
//! Sequence: authenticate with the request credential, validate, confirm the
//! trail exists, then invoke the update procedure. A missing trail never
//! reaches the procedure.

use serde::Serialize;

use crate::auth::{authorize, AuthError};
use crate::features::trails::types::{TrailBody, TrailValidationError};
use crate::features::TrailsState;
use crate::models::TrailId;
use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct UpdateTrailCommand {
    pub id: TrailId,
    pub body: Option<TrailBody>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateTrailResponse {
    pub trail_id: TrailId,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateTrailError {
    #[error("Authentication required. Please provide Email and Password.")]
    MissingCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] TrailValidationError),

    #[error("Trail {0} not found")]
    NotFound(TrailId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip_all, fields(trail_id = command.id))]
pub async fn handle(
    state: &TrailsState,
    command: UpdateTrailCommand,
) -> Result<UpdateTrailResponse, UpdateTrailError> {
    let body = command.body.ok_or(UpdateTrailError::MissingCredentials)?;

    authorize(state.auth.as_ref(), &body.credential).await?;

    let fields = body.trail.validate()?;

    if !state.store.exists(command.id).await? {
        return Err(UpdateTrailError::NotFound(command.id));
    }

    state.store.update(command.id, &fields).await?;

    tracing::info!("Trail updated");

    Ok(UpdateTrailResponse {
        trail_id: command.id,
    })
}
