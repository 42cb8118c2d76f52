use metrics_exporter_prometheus::PrometheusHandle;
use nbc_compliance::error::AppError;
use nbc_compliance::workflows::calculator::Selections;
use nbc_compliance::workflows::files::UploadedFile;
use nbc_compliance::workflows::projects::{
    NotificationError, NotificationPublisher, ProjectFilter, ProjectId, ProjectNotice,
    ProjectRecord, ProjectRepository, RepositoryError,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProjectRepository {
    records: Arc<Mutex<HashMap<ProjectId, ProjectRecord>>>,
}

impl ProjectRepository for InMemoryProjectRepository {
    fn insert(&self, record: ProjectRecord) -> Result<ProjectRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ProjectRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, filter: &ProjectFilter) -> Result<Vec<ProjectRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ProjectRecord> = guard
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Per-recipient inbox standing in for the e-mail and in-app channels.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Arc<Mutex<Vec<ProjectNotice>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notice: ProjectNotice) -> Result<(), NotificationError> {
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notice);
        Ok(())
    }

    fn notices_for(&self, recipient: &str) -> Result<Vec<ProjectNotice>, NotificationError> {
        let guard = self.events.lock().expect("notification mutex poisoned");
        Ok(guard
            .iter()
            .filter(|notice| notice.recipient == recipient)
            .cloned()
            .collect())
    }
}

/// Load a selections record from a JSON file on disk.
pub(crate) fn read_selections(path: &Path) -> Result<Selections, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Stand-in document references so pending checks can be run from the CLI.
pub(crate) fn placeholder_files(count: usize) -> Vec<UploadedFile> {
    (1..=count)
        .map(|index| UploadedFile {
            name: format!("document-{index}.pdf"),
            url: String::new(),
            size: 0,
            content_type: "application/pdf".to_string(),
            path: format!("local/document-{index}.pdf"),
        })
        .collect()
}
