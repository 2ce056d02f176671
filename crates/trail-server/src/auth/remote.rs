//! HTTP client for the university identity service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::{AuthGateway, AuthOutcome, INVALID_CREDENTIALS, NOT_VERIFIED};
use crate::config::AuthConfig;

/// Body of a verification request
#[derive(Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Decoded answer of the identity service
///
/// The service replies with a two-element JSON array such as
/// `["Verified", "True"]`. Only the second element matters, and only the
/// exact string `"True"` counts as verified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Vec<Value>")]
pub struct IdentityVerdict {
    pub status: Option<Value>,
    pub verified: Option<Value>,
}

impl From<Vec<Value>> for IdentityVerdict {
    fn from(values: Vec<Value>) -> Self {
        let mut values = values.into_iter();
        Self {
            status: values.next(),
            verified: values.next(),
        }
    }
}

impl IdentityVerdict {
    pub fn is_verified(&self) -> bool {
        matches!(&self.verified, Some(Value::String(flag)) if flag == "True")
    }
}

/// [`AuthGateway`] backed by a single POST to the identity service
///
/// One attempt per call, bounded by the configured timeout. Nothing is cached.
#[derive(Clone)]
pub struct RemoteAuthGateway {
    client: Client,
    url: String,
}

impl RemoteAuthGateway {
    pub fn new(config: &AuthConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("trail-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AuthGateway for RemoteAuthGateway {
    #[tracing::instrument(skip_all, fields(url = %self.url))]
    async fn verify_pair(&self, email: &str, password: &str) -> AuthOutcome {
        let response = match self
            .client
            .post(&self.url)
            .json(&VerifyRequest { email, password })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return AuthOutcome::ServiceError(e.to_string()),
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Identity service refused credential");
            return AuthOutcome::Rejected(INVALID_CREDENTIALS.to_string());
        }

        match response.json::<IdentityVerdict>().await {
            Ok(verdict) if verdict.is_verified() => AuthOutcome::Verified,
            Ok(_) => AuthOutcome::Rejected(NOT_VERIFIED.to_string()),
            Err(e) => AuthOutcome::ServiceError(e.to_string()),
        }
    }
}
