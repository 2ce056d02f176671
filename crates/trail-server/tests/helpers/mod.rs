//! Test helpers for trail server integration tests
//!
//! - In-memory [`TrailStore`] with per-operation call counters
//! - Scripted [`AuthGateway`] that records which email it was asked about
//! - App and request builders

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use trail_server::{
    api,
    auth::{AuthGateway, AuthOutcome, AuthPolicy, Credential},
    config::Config,
    store::{StoreError, StoreResult, TrailStore},
    Trail, TrailFields, TrailId, TrailsState,
};

pub const SERVICE_EMAIL: &str = "service@plymouth.ac.uk";

// ============================================================================
// Store
// ============================================================================

#[derive(Default)]
pub struct FakeTrailStore {
    trails: Mutex<BTreeMap<TrailId, Trail>>,
    next_id: AtomicUsize,
    unavailable: bool,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    pub exists_checks: AtomicUsize,
}

impl FakeTrailStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    /// Every operation fails as if the pool timed out
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    pub fn with_trail(self, trail: Trail) -> Self {
        self.next_id.fetch_max(trail.trail_id as usize + 1, Ordering::SeqCst);
        self.trails.lock().unwrap().insert(trail.trail_id, trail);
        self
    }

    pub fn trail(&self, id: TrailId) -> Option<Trail> {
        self.trails.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.trails.lock().unwrap().len()
    }

    pub fn writes(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::from(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn to_trail(id: TrailId, fields: &TrailFields) -> Trail {
    Trail {
        trail_id: id,
        trail_name: fields.trail_name.clone(),
        description: fields.description.clone(),
        length_km: fields.length_km,
        start_location: fields.start_location.clone(),
        end_location: fields.end_location.clone(),
        difficulty_id: fields.difficulty_id,
        route_type_id: fields.route_type_id,
        user_id: fields.user_id,
        difficulty: None,
        route_type: None,
    }
}

#[async_trait]
impl TrailStore for FakeTrailStore {
    async fn list(&self) -> StoreResult<Vec<Trail>> {
        self.check()?;
        Ok(self.trails.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: TrailId) -> StoreResult<Option<Trail>> {
        self.check()?;
        Ok(self.trail(id))
    }

    async fn create(&self, fields: &TrailFields) -> StoreResult<TrailId> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as TrailId;
        self.trails.lock().unwrap().insert(id, to_trail(id, fields));
        Ok(id)
    }

    async fn exists(&self, id: TrailId) -> StoreResult<bool> {
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.trails.lock().unwrap().contains_key(&id))
    }

    async fn update(&self, id: TrailId, fields: &TrailFields) -> StoreResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.trails.lock().unwrap().insert(id, to_trail(id, fields));
        Ok(())
    }

    async fn delete(&self, id: TrailId) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.trails.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}

// ============================================================================
// Identity gateway
// ============================================================================

pub struct FakeAuthGateway {
    outcome: AuthOutcome,
    pub calls: AtomicUsize,
    pub emails: Mutex<Vec<String>>,
}

impl FakeAuthGateway {
    pub fn answering(outcome: AuthOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            emails: Mutex::new(Vec::new()),
        }
    }

    pub fn verifying() -> Self {
        Self::answering(AuthOutcome::Verified)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn emails(&self) -> Vec<String> {
        self.emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn verify_pair(&self, email: &str, _password: &str) -> AuthOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.emails.lock().unwrap().push(email.to_string());
        self.outcome.clone()
    }
}

// ============================================================================
// App
// ============================================================================

pub fn embedded_policy() -> AuthPolicy {
    AuthPolicy::Embedded {
        service_credential: Credential::new(SERVICE_EMAIL, "service-secret"),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<FakeTrailStore>,
    pub auth: Arc<FakeAuthGateway>,
}

pub fn setup_app(store: FakeTrailStore, auth: FakeAuthGateway, policy: AuthPolicy) -> TestApp {
    let store = Arc::new(store);
    let auth = Arc::new(auth);
    let state = TrailsState::new(store.clone(), auth.clone(), policy);
    let router = api::create_router(state, &Config::default());
    TestApp {
        router,
        store,
        auth,
    }
}

pub fn sample_trail(id: TrailId) -> Trail {
    Trail {
        trail_id: id,
        trail_name: "Plym Valley".to_string(),
        description: Some("Riverside path".to_string()),
        length_km: 11.25,
        start_location: "Plymbridge".to_string(),
        end_location: "Clearbrook".to_string(),
        difficulty_id: 1,
        route_type_id: 2,
        user_id: 3,
        difficulty: Some("Easy".to_string()),
        route_type: Some("Out & Back".to_string()),
    }
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Body sent without a `Content-Type` header
pub fn untyped_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
