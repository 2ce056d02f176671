//! Delegated authentication
//!
//! Mutating routes verify a university credential pair against an external
//! identity service. The service is reached through the [`AuthGateway`]
//! trait so tests can substitute a fake verifier; [`RemoteAuthGateway`] is
//! the production implementation.
//!
//! Which credential a route verifies, and whether delete needs one at all,
//! is decided by the configured [`AuthPolicy`].

pub mod policy;
pub mod remote;

use async_trait::async_trait;
use serde::Deserialize;

pub use policy::{AuthPolicy, AuthPolicyKind, DeleteAuth};
pub use remote::{IdentityVerdict, RemoteAuthGateway};

/// Returned when either half of the pair is missing or empty.
pub const CREDENTIALS_REQUIRED: &str = "Email and Password are required.";

/// Returned when the identity service answers with a non-success status.
pub const INVALID_CREDENTIALS: &str = "Authentication Failed! Invalid credentials.";

/// Returned when the identity service answers but does not verify the user.
pub const NOT_VERIFIED: &str = "Authentication Failed!";

/// Email/password pair as submitted in a request body
///
/// Never persisted and never logged; `Debug` redacts the password.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credential {
    #[serde(rename = "Email", default)]
    pub email: Option<String>,

    #[serde(rename = "Password", default)]
    pub password: Option<String>,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// True when neither field was supplied at all
    pub fn is_absent(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    /// Both halves, when both are present and non-empty
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            },
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email.as_ref().map(|_| "<redacted>"))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of one verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Verified,
    /// The credential was refused; reason is client-facing
    Rejected(String),
    /// The identity service could not be reached or answered garbage
    ServiceError(String),
}

impl AuthOutcome {
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            AuthOutcome::Verified => Ok(()),
            AuthOutcome::Rejected(reason) => Err(AuthError::Rejected(reason)),
            AuthOutcome::ServiceError(reason) => Err(AuthError::Service(reason)),
        }
    }
}

/// Authentication failure as seen by command handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Maps to 401
    #[error("{0}")]
    Rejected(String),

    /// Maps to 500
    #[error("Service Error: {0}")]
    Service(String),
}

/// Verifier for credential pairs
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Ask the identity service about a complete, non-empty pair
    async fn verify_pair(&self, email: &str, password: &str) -> AuthOutcome;

    /// Verify a submitted credential
    ///
    /// Incomplete credentials are rejected without contacting the service.
    async fn verify(&self, credential: &Credential) -> AuthOutcome {
        match credential.pair() {
            Some((email, password)) => self.verify_pair(email, password).await,
            None => AuthOutcome::Rejected(CREDENTIALS_REQUIRED.to_string()),
        }
    }
}

/// Verify `credential` and turn the outcome into a `Result`
pub async fn authorize(gateway: &dyn AuthGateway, credential: &Credential) -> Result<(), AuthError> {
    let outcome = gateway.verify(credential).await;
    match &outcome {
        AuthOutcome::Verified => tracing::debug!("Credential verified"),
        AuthOutcome::Rejected(reason) => tracing::info!(%reason, "Credential rejected"),
        AuthOutcome::ServiceError(reason) => {
            tracing::error!(%reason, "Identity service unavailable")
        },
    }
    outcome.into_result()
}
