//! Create trail command
//!
//! Sequence: authenticate (per [`AuthPolicy`](crate::auth::AuthPolicy)),
//! validate the fields, then invoke the storage-side create procedure.
//! Storage assigns the identifier.

use serde::Serialize;

use crate::auth::{authorize, AuthError};
use crate::features::trails::types::{TrailBody, TrailValidationError};
use crate::features::TrailsState;
use crate::models::TrailId;
use crate::store::StoreError;

#[derive(Debug, Clone, Default)]
pub struct CreateTrailCommand {
    /// `None` when the request carried no usable JSON body
    pub body: Option<TrailBody>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTrailResponse {
    pub trail_id: TrailId,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateTrailError {
    #[error("Authentication required. Please provide Email and Password.")]
    MissingCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] TrailValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip_all, fields(policy = %state.policy.kind()))]
pub async fn handle(
    state: &TrailsState,
    command: CreateTrailCommand,
) -> Result<CreateTrailResponse, CreateTrailError> {
    let body = match command.body {
        Some(body) => body,
        None if state.policy.create_uses_request_credential() => {
            return Err(CreateTrailError::MissingCredentials)
        },
        None => TrailBody::default(),
    };

    authorize(state.auth.as_ref(), state.policy.create_credential(&body.credential)).await?;

    let fields = body.trail.validate()?;

    let trail_id = state.store.create(&fields).await?;

    tracing::info!(trail_id, trail_name = %fields.trail_name, "Trail created");

    Ok(CreateTrailResponse { trail_id })
}
