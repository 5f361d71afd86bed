use crate::config::{Settings, redact};
use crate::tfs::client::{TfsError, TfsServiceClient};
use crate::tfs::models::{ChangesetInfo, TfsRequest};
use async_trait::async_trait;

impl From<&Settings> for TfsRequest {
    fn from(settings: &Settings) -> Self {
        Self {
            tfs_url: settings.tfs_url.clone(),
            project_url: settings.project_url.clone(),
            user_name: settings.user.clone(),
            password: settings.password.clone(),
            start_date: settings.start_date.clone(),
            end_date: settings.end_date.clone(),
        }
    }
}

impl TfsRequest {
    /// Copy of the request that is safe to log.
    pub fn redacted(&self) -> Self {
        Self {
            password: redact(&self.password).to_string(),
            ..self.clone()
        }
    }
}

/// Anything that can answer a changeset query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangesetSource: Send + Sync {
    async fn query_changesets(&self, request: &TfsRequest)
    -> Result<Vec<ChangesetInfo>, TfsError>;
}

#[async_trait]
impl ChangesetSource for TfsServiceClient {
    async fn query_changesets(
        &self,
        request: &TfsRequest,
    ) -> Result<Vec<ChangesetInfo>, TfsError> {
        query_changesets(self, request).await
    }
}

/// Fetch the changesets in the request's date range, with their work items
pub async fn query_changesets(
    client: &TfsServiceClient,
    request: &TfsRequest,
) -> Result<Vec<ChangesetInfo>, TfsError> {
    if let Ok(json) = serde_json::to_string_pretty(&request.redacted()) {
        log::debug!("Request body: {}", json);
    }
    client.post_json(request).await
}
