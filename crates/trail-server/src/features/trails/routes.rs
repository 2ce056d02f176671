//! Trail API routes
//!
//! Wires the commands and queries to Axum handlers and owns the mapping
//! from their errors to status codes.
//!
//! # Route Structure
//!
//! - `GET /trails` - List all trails (public)
//! - `POST /trails` - Create a trail (authenticated)
//! - `GET /trails/:id` - Fetch one trail (public)
//! - `PUT /trails/:id` - Update a trail (authenticated)
//! - `DELETE /trails/:id` - Delete a trail (authenticated per policy)

use crate::api::extract::OptionalJson;
use crate::api::response::{ErrorBody, MessageResponse};
use crate::auth::{AuthError, Credential};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::{
    commands::{
        CreateTrailCommand, CreateTrailError, DeleteTrailCommand, DeleteTrailError,
        UpdateTrailCommand, UpdateTrailError,
    },
    queries::{GetTrailError, GetTrailQuery, ListTrailsError, ListTrailsQuery},
    types::{
        TrailBody, AUTHENTICATION_REQUIRED, TRAIL_CREATED, TRAIL_DELETED, TRAIL_NOT_FOUND,
        TRAIL_UPDATED,
    },
};
use crate::features::TrailsState;
use crate::models::TrailId;
use crate::store::StoreError;

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the trails router
///
/// The collection answers with and without a trailing slash.
pub fn trails_routes() -> Router<TrailsState> {
    Router::new()
        .route("/trails", get(list_trails).post(create_trail))
        .route("/trails/", get(list_trails).post(create_trail))
        .route("/trails/:id", get(get_trail).put(update_trail).delete(delete_trail))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a trail
///
/// - `201 Created` - `{"message": "Trail created successfully"}`
/// - `400 Bad Request` - missing body, unparseable body, or invalid field
/// - `401 Unauthorized` - credential rejected
/// - `500 Internal Server Error` - storage or identity service failure
async fn create_trail(
    State(state): State<TrailsState>,
    OptionalJson(body): OptionalJson<TrailBody>,
) -> Result<Response, TrailApiError> {
    let command = CreateTrailCommand { body };

    super::commands::create::handle(&state, command).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new(TRAIL_CREATED))).into_response())
}

/// Update a trail
///
/// - `200 OK` - `{"message": "Trail updated successfully"}`
/// - `400 Bad Request` - missing body or invalid field
/// - `401 Unauthorized` - credential rejected
/// - `404 Not Found` - no trail with this id
/// - `500 Internal Server Error` - storage or identity service failure
#[tracing::instrument(skip(state, body))]
async fn update_trail(
    State(state): State<TrailsState>,
    Path(id): Path<TrailId>,
    OptionalJson(body): OptionalJson<TrailBody>,
) -> Result<Response, TrailApiError> {
    let command = UpdateTrailCommand { id, body };

    super::commands::update::handle(&state, command).await?;

    Ok((StatusCode::OK, Json(MessageResponse::new(TRAIL_UPDATED))).into_response())
}

/// Delete a trail
///
/// Answers `204 No Content` with a message body, which existing clients
/// rely on even though HTTP transports may drop it.
#[tracing::instrument(skip(state, credential))]
async fn delete_trail(
    State(state): State<TrailsState>,
    Path(id): Path<TrailId>,
    OptionalJson(credential): OptionalJson<Credential>,
) -> Result<Response, TrailApiError> {
    let command = DeleteTrailCommand { id, credential };

    super::commands::delete::handle(&state, command).await?;

    Ok((StatusCode::NO_CONTENT, Json(MessageResponse::new(TRAIL_DELETED))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

async fn list_trails(State(state): State<TrailsState>) -> Result<Response, TrailApiError> {
    let trails = super::queries::list::handle(&state, ListTrailsQuery).await?;
    Ok((StatusCode::OK, Json(trails)).into_response())
}

#[tracing::instrument(skip(state))]
async fn get_trail(
    State(state): State<TrailsState>,
    Path(id): Path<TrailId>,
) -> Result<Response, TrailApiError> {
    let trail = super::queries::get::handle(&state, GetTrailQuery { id }).await?;
    Ok((StatusCode::OK, Json(trail)).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for trail API endpoints
#[derive(Debug)]
enum TrailApiError {
    CreateError(CreateTrailError),
    UpdateError(UpdateTrailError),
    DeleteError(DeleteTrailError),
    GetError(GetTrailError),
    ListError(ListTrailsError),
}

impl From<CreateTrailError> for TrailApiError {
    fn from(err: CreateTrailError) -> Self {
        Self::CreateError(err)
    }
}

impl From<UpdateTrailError> for TrailApiError {
    fn from(err: UpdateTrailError) -> Self {
        Self::UpdateError(err)
    }
}

impl From<DeleteTrailError> for TrailApiError {
    fn from(err: DeleteTrailError) -> Self {
        Self::DeleteError(err)
    }
}

impl From<GetTrailError> for TrailApiError {
    fn from(err: GetTrailError) -> Self {
        Self::GetError(err)
    }
}

impl From<ListTrailsError> for TrailApiError {
    fn from(err: ListTrailsError) -> Self {
        Self::ListError(err)
    }
}

fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(text))).into_response()
}

/// 500 carrying the raw failure text
///
/// Exposes internal detail to clients; existing consumers parse it.
fn internal(operation: &str, detail: String) -> Response {
    tracing::error!(operation, error = %detail, "Trail request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(detail))).into_response()
}

fn auth_failure(operation: &str, err: AuthError) -> Response {
    match err {
        AuthError::Rejected(reason) => message(StatusCode::UNAUTHORIZED, reason),
        AuthError::Service(_) => internal(operation, err.to_string()),
    }
}

fn store_failure(operation: &str, err: StoreError) -> Response {
    internal(operation, err.to_string())
}

impl IntoResponse for TrailApiError {
    fn into_response(self) -> Response {
        match self {
            // Create errors
            TrailApiError::CreateError(CreateTrailError::MissingCredentials) => {
                message(StatusCode::BAD_REQUEST, AUTHENTICATION_REQUIRED)
            },
            TrailApiError::CreateError(CreateTrailError::Auth(e)) => auth_failure("create", e),
            TrailApiError::CreateError(CreateTrailError::Validation(e)) => {
                message(StatusCode::BAD_REQUEST, e.to_string())
            },
            TrailApiError::CreateError(CreateTrailError::Store(e)) => store_failure("create", e),

            // Update errors
            TrailApiError::UpdateError(UpdateTrailError::MissingCredentials) => {
                message(StatusCode::BAD_REQUEST, AUTHENTICATION_REQUIRED)
            },
            TrailApiError::UpdateError(UpdateTrailError::Auth(e)) => auth_failure("update", e),
            TrailApiError::UpdateError(UpdateTrailError::Validation(e)) => {
                message(StatusCode::BAD_REQUEST, e.to_string())
            },
            TrailApiError::UpdateError(UpdateTrailError::NotFound(_)) => {
                message(StatusCode::NOT_FOUND, TRAIL_NOT_FOUND)
            },
            TrailApiError::UpdateError(UpdateTrailError::Store(e)) => store_failure("update", e),

            // Delete errors
            TrailApiError::DeleteError(DeleteTrailError::MissingCredentials) => {
                message(StatusCode::BAD_REQUEST, AUTHENTICATION_REQUIRED)
            },
            TrailApiError::DeleteError(DeleteTrailError::Auth(e)) => auth_failure("delete", e),
            TrailApiError::DeleteError(DeleteTrailError::Store(e)) => store_failure("delete", e),

            // Query errors
            TrailApiError::GetError(GetTrailError::NotFound(_)) => {
                message(StatusCode::NOT_FOUND, TRAIL_NOT_FOUND)
            },
            TrailApiError::GetError(GetTrailError::Store(e)) => store_failure("get", e),
            TrailApiError::ListError(ListTrailsError::Store(e)) => store_failure("list", e),
        }
    }
}
