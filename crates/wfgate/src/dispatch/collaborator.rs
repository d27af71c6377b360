//! Collaborator call contract.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::NormalizedRequest;

/// An external execution path the gateway forwards normalized requests to.
///
/// The gateway awaits the call inline and imposes no timeout or retry; the
/// collaborator owns its own concurrency and backpressure. Failures are
/// returned, never panicked, so the HTTP layer can map them to a status
/// code. The gateway does not distinguish why a call failed.
#[async_trait]
pub trait Collaborator: Send + Sync {
    async fn call(&self, request: NormalizedRequest) -> Result<()>;
}

/// Stand-in collaborator for running the gateway standalone: logs the
/// payload and accepts it. Deployments embedding the crate supply real
/// implementations.
pub struct LogCollaborator {
    name: &'static str,
}

impl LogCollaborator {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl Collaborator for LogCollaborator {
    async fn call(&self, request: NormalizedRequest) -> Result<()> {
        info!(collaborator = self.name, payload = %request, "accepted request");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_collaborator_accepts() {
        let collaborator = LogCollaborator::new("wf_trigger");
        let result = collaborator.call(json!({"ctx": {"workflowID": "wf-1"}})).await;
        assert!(result.is_ok());
    }
}
