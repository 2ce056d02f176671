//! Request body extraction
//!
//! Clients of the trail API do not reliably send `Content-Type:
//! application/json`, and an absent body is meaningful (it selects the
//! "no credentials" path). [`OptionalJson`] therefore reads the raw bytes:
//! an empty body is `None`, anything else must parse as JSON whatever the
//! declared content type.

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use super::response::MessageResponse;

/// JSON body that may be absent
#[derive(Debug, Clone)]
pub struct OptionalJson<T>(pub Option<T>);

#[derive(Debug, thiserror::Error)]
pub enum BodyRejection {
    #[error("Failed to read request body: {0}")]
    Unreadable(#[from] BytesRejection),

    #[error("Invalid request body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            BodyRejection::Unreadable(e) => e.status(),
            BodyRejection::Malformed(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(error = %self, "Rejected request body");
        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Ok(Self(parse_optional(&bytes)?))
    }
}

fn parse_optional<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest},
    };

    async fn extract(request: Request) -> Result<OptionalJson<Credential>, BodyRejection> {
        OptionalJson::<Credential>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_empty_body_is_absent() {
        let request = HttpRequest::builder().body(Body::empty()).unwrap();
        assert!(extract(request).await.unwrap().0.is_none());

        let request = HttpRequest::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("  \n"))
            .unwrap();
        assert!(extract(request).await.unwrap().0.is_none());
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_parsed() {
        let request = HttpRequest::builder()
            .body(Body::from(r#"{"Email":"a@plymouth.ac.uk","Password":"x"}"#))
            .unwrap();

        let credential = extract(request).await.unwrap().0.unwrap();
        assert_eq!(credential.pair(), Some(("a@plymouth.ac.uk", "x")));
    }

    #[tokio::test]
    async fn test_syntax_error_is_rejected() {
        let request = HttpRequest::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"Email": "#))
            .unwrap();

        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, BodyRejection::Malformed(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_wrong_field_type_names_the_problem() {
        let err = parse_optional::<Credential>(br#"{"Email": 5, "Password": "x"}"#).unwrap_err();
        let message = BodyRejection::from(err).to_string();
        assert!(message.starts_with("Invalid request body: invalid type"));
    }
}
