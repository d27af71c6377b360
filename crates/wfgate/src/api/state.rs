//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::AuthState;
use crate::dispatch::Collaborator;
use crate::users::UserStore;

/// Shared, read-only state for the request handlers.
///
/// Everything here is immutable after startup; requests never write shared
/// state, so handlers run concurrently without coordination.
#[derive(Clone)]
pub struct AppState {
    /// Token codec plus credential resolution for the auth gate.
    pub auth: AuthState,
    /// Credential store, used directly by the login flow.
    pub users: Arc<dyn UserStore>,
    /// Workflow-trigger collaborator behind `POST /trigger`.
    pub workflow: Arc<dyn Collaborator>,
    /// Generic-handler collaborator behind `POST /exec`.
    pub handler: Arc<dyn Collaborator>,
}

impl AppState {
    pub fn new(
        auth: AuthState,
        users: Arc<dyn UserStore>,
        workflow: Arc<dyn Collaborator>,
        handler: Arc<dyn Collaborator>,
    ) -> Self {
        Self {
            auth,
            users,
            workflow,
            handler,
        }
    }
}
