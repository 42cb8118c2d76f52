use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ProjectId, ProjectRecord, ProjectStatus, Requester};

/// Narrows a listing to what the caller may see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub owner_id: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    /// Members only see their own projects; administrators see everything.
    pub fn visible_to(requester: &Requester) -> Self {
        Self {
            owner_id: (!requester.is_admin()).then(|| requester.user_id.clone()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        self.owner_id
            .as_ref()
            .map_or(true, |owner| &record.owner_id == owner)
            && self.status.map_or(true, |status| record.status == status)
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait ProjectRepository: Send + Sync {
    fn insert(&self, record: ProjectRecord) -> Result<ProjectRecord, RepositoryError>;
    fn update(&self, record: ProjectRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError>;
    fn list(&self, filter: &ProjectFilter) -> Result<Vec<ProjectRecord>, RepositoryError>;
    fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (e-mail, in-app inbox, ...).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notice: ProjectNotice) -> Result<(), NotificationError>;
    fn notices_for(&self, recipient: &str) -> Result<Vec<ProjectNotice>, NotificationError>;
}

/// Recipient used for notices addressed to every administrator.
pub const ADMIN_RECIPIENT: &str = "admins";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNotice {
    pub template: String,
    pub project_id: ProjectId,
    pub recipient: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
