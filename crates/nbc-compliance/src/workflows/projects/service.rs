use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{ProjectDraft, ProjectId, ProjectRecord, ProjectStatus, Requester};
use super::report::{export_csv, ProjectReport, ReportError};
use super::report::views::ProjectReportSummary;
use super::repository::{
    NotificationError, NotificationPublisher, ProjectFilter, ProjectNotice, ProjectRepository,
    RepositoryError, ADMIN_RECIPIENT,
};
use crate::workflows::files::{FilePolicy, FileRejection, UploadedFile};

/// Service composing scoring, file limits, storage, and notifications.
pub struct ProjectService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    files: FilePolicy,
}

static PROJECT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_project_id() -> ProjectId {
    let id = PROJECT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProjectId(format!("prj-{id:06}"))
}

impl<R, N> ProjectService<R, N>
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, files: FilePolicy) -> Self {
        Self {
            repository,
            notifier,
            files,
        }
    }

    pub fn file_policy(&self) -> FilePolicy {
        self.files
    }

    /// Store a partially completed project without any completeness check.
    pub fn save_draft(
        &self,
        requester: &Requester,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let draft = self.accept_files(draft)?;
        let record = ProjectRecord::new(
            next_project_id(),
            requester.user_id.clone(),
            ProjectStatus::Draft,
            draft,
            Utc::now(),
        );

        let stored = self.repository.insert(record)?;
        info!(
            project_id = %stored.id.0,
            owner = %stored.owner_id,
            total_points = stored.total_points,
            "project draft saved"
        );
        Ok(stored)
    }

    /// Submit a project for review once every required field is filled in.
    pub fn submit(
        &self,
        requester: &Requester,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let draft = self.accept_files(draft)?;
        let record = ProjectRecord::new(
            next_project_id(),
            requester.user_id.clone(),
            ProjectStatus::Submitted,
            draft,
            Utc::now(),
        );
        ensure_complete(&record)?;

        let stored = self.repository.insert(record)?;
        info!(
            project_id = %stored.id.0,
            owner = %stored.owner_id,
            tier = stored.compliance.tier.label(),
            "project submitted"
        );
        self.notify(submitted_notice(&stored));

        Ok(stored)
    }

    /// Replace a project's form state. Submitted projects must stay complete.
    pub fn update(
        &self,
        requester: &Requester,
        id: &ProjectId,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        self.edit(requester, id, draft, false)
    }

    /// Replace a stored project's form state and move it to submitted.
    pub fn submit_existing(
        &self,
        requester: &Requester,
        id: &ProjectId,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        self.edit(requester, id, draft, true)
    }

    pub fn get(
        &self,
        requester: &Requester,
        id: &ProjectId,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        self.fetch_visible(requester, id)
    }

    pub fn list(&self, requester: &Requester) -> Result<Vec<ProjectRecord>, ProjectServiceError> {
        let filter = ProjectFilter::visible_to(requester);
        Ok(self.repository.list(&filter)?)
    }

    pub fn delete(&self, requester: &Requester, id: &ProjectId) -> Result<(), ProjectServiceError> {
        let record = self.fetch_visible(requester, id)?;
        self.repository.delete(&record.id)?;
        info!(project_id = %record.id.0, by = %requester.user_id, "project deleted");
        Ok(())
    }

    pub fn attach_file(
        &self,
        requester: &Requester,
        id: &ProjectId,
        file: UploadedFile,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let mut record = self.fetch_visible(requester, id)?;
        let file = self.files.accept(file)?;
        if record
            .uploaded_files
            .iter()
            .any(|existing| existing.path == file.path)
        {
            return Err(FileRejection::DuplicatePath(file.path).into());
        }

        info!(project_id = %record.id.0, path = %file.path, size = file.size, "file attached");
        record.uploaded_files.push(file);
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn remove_file(
        &self,
        requester: &Requester,
        id: &ProjectId,
        path: &str,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let mut record = self.fetch_visible(requester, id)?;
        let before = record.uploaded_files.len();
        record.uploaded_files.retain(|file| file.path != path);
        if record.uploaded_files.len() == before {
            return Err(FileRejection::UnknownPath(path.to_string()).into());
        }
        if record.status == ProjectStatus::Submitted {
            ensure_complete(&record)?;
        }

        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;
        info!(project_id = %record.id.0, path, "file removed");
        Ok(record)
    }

    pub fn report(&self, requester: &Requester) -> Result<ProjectReportSummary, ProjectServiceError> {
        let records = self.admin_records(requester)?;
        Ok(ProjectReport::from_records(&records).summary())
    }

    pub fn export_csv(&self, requester: &Requester) -> Result<String, ProjectServiceError> {
        let records = self.admin_records(requester)?;
        Ok(export_csv(&records)?)
    }

    pub fn notifications(
        &self,
        requester: &Requester,
    ) -> Result<Vec<ProjectNotice>, ProjectServiceError> {
        let mut notices = self.notifier.notices_for(&requester.user_id)?;
        if requester.is_admin() {
            notices.extend(self.notifier.notices_for(ADMIN_RECIPIENT)?);
        }
        Ok(notices)
    }

    fn edit(
        &self,
        requester: &Requester,
        id: &ProjectId,
        draft: ProjectDraft,
        submit: bool,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let mut record = self.fetch_visible(requester, id)?;
        let draft = self.accept_files(draft)?;
        let newly_submitted = submit && record.status == ProjectStatus::Draft;
        record.apply(draft, Utc::now());
        if submit {
            record.status = ProjectStatus::Submitted;
        }
        if record.status == ProjectStatus::Submitted {
            ensure_complete(&record)?;
        }

        self.repository.update(record.clone())?;
        info!(
            project_id = %record.id.0,
            editor = %requester.user_id,
            status = record.status.label(),
            "project updated"
        );

        if newly_submitted {
            self.notify(submitted_notice(&record));
        }
        if requester.is_admin() && record.owner_id != requester.user_id {
            let mut details = BTreeMap::new();
            details.insert("editor".to_string(), requester.user_id.clone());
            self.notify(ProjectNotice {
                template: "project_updated_by_admin".to_string(),
                project_id: record.id.clone(),
                recipient: record.owner_id.clone(),
                details,
            });
        }

        Ok(record)
    }

    /// Publishes a notice, logging delivery failures instead of returning them.
    fn notify(&self, notice: ProjectNotice) {
        let project_id = notice.project_id.0.clone();
        let template = notice.template.clone();
        if let Err(error) = self.notifier.publish(notice) {
            warn!(%project_id, %template, %error, "project notice not delivered");
        }
    }

    fn admin_records(&self, requester: &Requester) -> Result<Vec<ProjectRecord>, ProjectServiceError> {
        if !requester.is_admin() {
            return Err(ProjectServiceError::Forbidden);
        }
        Ok(self.repository.list(&ProjectFilter::default())?)
    }

    fn fetch_visible(
        &self,
        requester: &Requester,
        id: &ProjectId,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        if !requester.can_access(&record) {
            warn!(project_id = %id.0, user = %requester.user_id, "project access denied");
            return Err(ProjectServiceError::Forbidden);
        }
        Ok(record)
    }

    fn accept_files(&self, mut draft: ProjectDraft) -> Result<ProjectDraft, ProjectServiceError> {
        draft.uploaded_files = self.files.accept_all(draft.uploaded_files)?;
        Ok(draft)
    }
}

fn submitted_notice(record: &ProjectRecord) -> ProjectNotice {
    let mut details = BTreeMap::new();
    details.insert("owner".to_string(), record.owner_id.clone());
    details.insert("tier".to_string(), record.compliance.tier.label().to_string());
    details.insert("total_points".to_string(), record.total_points.to_string());
    ProjectNotice {
        template: "project_submitted".to_string(),
        project_id: record.id.clone(),
        recipient: ADMIN_RECIPIENT.to_string(),
        details,
    }
}

fn ensure_complete(record: &ProjectRecord) -> Result<(), ProjectServiceError> {
    let pending = record.pending();
    if pending.is_complete() {
        return Ok(());
    }
    Err(ProjectServiceError::Incomplete {
        missing: pending.required_labels(),
    })
}

/// Error raised by the project service.
#[derive(Debug, thiserror::Error)]
pub enum ProjectServiceError {
    #[error("project is missing required items: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },
    #[error("project belongs to another user")]
    Forbidden,
    #[error(transparent)]
    File(#[from] FileRejection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
