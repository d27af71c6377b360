//! Test utilities and common setup.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::Router;
use chrono::Duration;

use wfgate::api::{create_router, AppState};
use wfgate::auth::{AuthState, TokenCodec};
use wfgate::dispatch::{Collaborator, NormalizedRequest};
use wfgate::users::{InMemoryUserStore, StoredUser};

pub const TEST_SECRET: &str = "test-secret-for-integration-tests-minimum-32-chars";

/// Collaborator mock that records every payload it receives.
#[derive(Default)]
pub struct RecordingCollaborator {
    calls: Mutex<Vec<NormalizedRequest>>,
}

impl RecordingCollaborator {
    pub fn calls(&self) -> Vec<NormalizedRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Collaborator for RecordingCollaborator {
    async fn call(&self, request: NormalizedRequest) -> Result<()> {
        self.calls.lock().unwrap().push(request);
        Ok(())
    }
}

/// Collaborator mock that always fails.
pub struct FailingCollaborator;

#[async_trait]
impl Collaborator for FailingCollaborator {
    async fn call(&self, _request: NormalizedRequest) -> Result<()> {
        bail!("collaborator exploded");
    }
}

pub fn make_user(username: &str, password: &str) -> StoredUser {
    let password_hash =
        bcrypt::hash(password, 4).expect("failed to hash password");

    StoredUser {
        username: username.to_string(),
        full_name: Some("John Doe".to_string()),
        email: Some(format!("{username}@example.com")),
        password_hash,
    }
}

pub fn test_codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET, Duration::minutes(30))
}

/// Create a test application wired with the given collaborators and a
/// single seeded user johndoe / secret123.
pub fn test_app(
    workflow: Arc<dyn Collaborator>,
    handler: Arc<dyn Collaborator>,
) -> Router {
    let users = Arc::new(InMemoryUserStore::new([make_user("johndoe", "secret123")]));
    let auth = AuthState::new(Arc::new(test_codec()), users.clone());
    let state = AppState::new(auth, users, workflow, handler);
    create_router(state, &[])
}

/// Test app with recording collaborators on both paths.
pub fn recording_app() -> (Router, Arc<RecordingCollaborator>, Arc<RecordingCollaborator>) {
    let workflow = Arc::new(RecordingCollaborator::default());
    let handler = Arc::new(RecordingCollaborator::default());
    let app = test_app(workflow.clone(), handler.clone());
    (app, workflow, handler)
}
