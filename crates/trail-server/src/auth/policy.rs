//! Authentication policies
//!
//! Two deployments of the service disagreed on how mutating routes
//! authenticate. Rather than pick one silently, both are named here and
//! selected through `TRAIL_AUTH_POLICY`.
//!
//! | Route  | `per-request`                 | `embedded`                          |
//! |--------|-------------------------------|-------------------------------------|
//! | POST   | body `Email`/`Password`       | configured service credential       |
//! | PUT    | body `Email`/`Password`       | body `Email`/`Password`             |
//! | DELETE | required, 400 when body empty | verified only when body carries one |

use serde::{Deserialize, Serialize};

use super::Credential;

/// Serializable policy selector used by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthPolicyKind {
    #[default]
    PerRequest,
    Embedded,
}

impl std::str::FromStr for AuthPolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-request" | "per_request" | "request" => Ok(AuthPolicyKind::PerRequest),
            "embedded" | "fixed" => Ok(AuthPolicyKind::Embedded),
            other => Err(anyhow::anyhow!(
                "Invalid auth policy '{}': expected 'per-request' or 'embedded'",
                other
            )),
        }
    }
}

impl std::fmt::Display for AuthPolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthPolicyKind::PerRequest => write!(f, "per-request"),
            AuthPolicyKind::Embedded => write!(f, "embedded"),
        }
    }
}

/// Whether a delete request must carry credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAuth {
    Required,
    Optional,
}

/// Runtime policy, resolved from configuration at startup
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    PerRequest,
    Embedded { service_credential: Credential },
}

impl AuthPolicy {
    pub fn kind(&self) -> AuthPolicyKind {
        match self {
            AuthPolicy::PerRequest => AuthPolicyKind::PerRequest,
            AuthPolicy::Embedded { .. } => AuthPolicyKind::Embedded,
        }
    }

    /// Credential a create request is verified with
    pub fn create_credential<'a>(&'a self, supplied: &'a Credential) -> &'a Credential {
        match self {
            AuthPolicy::PerRequest => supplied,
            AuthPolicy::Embedded { service_credential } => service_credential,
        }
    }

    /// True when create reads credentials from the request body
    pub fn create_uses_request_credential(&self) -> bool {
        matches!(self, AuthPolicy::PerRequest)
    }

    pub fn delete_auth(&self) -> DeleteAuth {
        match self {
            AuthPolicy::PerRequest => DeleteAuth::Required,
            AuthPolicy::Embedded { .. } => DeleteAuth::Optional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_kind() {
        assert_eq!("per-request".parse::<AuthPolicyKind>().unwrap(), AuthPolicyKind::PerRequest);
        assert_eq!("EMBEDDED".parse::<AuthPolicyKind>().unwrap(), AuthPolicyKind::Embedded);
        assert!("open".parse::<AuthPolicyKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in [AuthPolicyKind::PerRequest, AuthPolicyKind::Embedded] {
            assert_eq!(kind.to_string().parse::<AuthPolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_embedded_policy_substitutes_service_credential() {
        let service = Credential::new("svc@plymouth.ac.uk", "svc-pass");
        let policy = AuthPolicy::Embedded { service_credential: service.clone() };
        let supplied = Credential::new("user@plymouth.ac.uk", "user-pass");

        assert_eq!(policy.create_credential(&supplied), &service);
        assert_eq!(policy.delete_auth(), DeleteAuth::Optional);
        assert_eq!(policy.kind(), AuthPolicyKind::Embedded);
    }

    #[test]
    fn test_per_request_policy_uses_supplied_credential() {
        let policy = AuthPolicy::PerRequest;
        let supplied = Credential::new("user@plymouth.ac.uk", "user-pass");

        assert_eq!(policy.create_credential(&supplied), &supplied);
        assert_eq!(policy.delete_auth(), DeleteAuth::Required);
        assert!(policy.create_uses_request_credential());
    }
}
