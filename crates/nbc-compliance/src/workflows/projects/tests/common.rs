use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::calculator::Selections;
use crate::workflows::files::{FilePolicy, UploadedFile};
use crate::workflows::projects::domain::{ProjectDraft, ProjectId, ProjectRecord};
use crate::workflows::projects::repository::{
    NotificationError, NotificationPublisher, ProjectFilter, ProjectNotice, ProjectRepository,
    RepositoryError,
};
use crate::workflows::projects::router::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::workflows::projects::{project_router, ProjectService};

/// A Saskatchewan tiered-prescriptive project with every required field set.
pub(super) fn complete_selections() -> Selections {
    Selections {
        first_name: Some("Avery".to_string()),
        last_name: Some("Lindqvist".to_string()),
        company: Some("Prairie Build Co".to_string()),
        phone_number: Some("306-555-0142".to_string()),
        street_address: Some("410 Albert Street".to_string()),
        city: Some("Regina".to_string()),
        postal_code: Some("S4R 2N7".to_string()),
        province: Some("saskatchewan".to_string()),
        building_type: Some("multi-unit".to_string()),
        compliance_path: Some("9368".to_string()),
        attic_rsi: Some("9.52".to_string()),
        wall_rsi: Some("3.85".to_string()),
        below_grade_rsi: Some("3.09".to_string()),
        floors_slabs_selected: vec!["heated-floor".to_string()],
        window_u_value: Some("1.44".to_string()),
        airtightness: Some("AL-3A".to_string()),
        has_hrv: Some("with_hrv".to_string()),
        hrv: Some("75".to_string()),
        water_heater: Some("gas-storage-0.80".to_string()),
        is_volume_over380: Some("no".to_string()),
        building_volume: Some("0-180".to_string()),
        ..Selections::default()
    }
}

pub(super) fn document(name: &str, size: u64) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        url: format!("https://storage.example.com/projects/{name}"),
        size,
        content_type: String::new(),
        path: format!("projects/{name}"),
    }
}

pub(super) fn complete_draft() -> ProjectDraft {
    ProjectDraft {
        selections: complete_selections(),
        uploaded_files: vec![document("energy-model.pdf", 48_000)],
    }
}

pub(super) fn partial_draft() -> ProjectDraft {
    ProjectDraft {
        selections: Selections {
            province: Some("alberta".to_string()),
            compliance_path: Some("9362".to_string()),
            wall_rsi: Some("3.69".to_string()),
            ..Selections::default()
        },
        uploaded_files: Vec::new(),
    }
}

pub(super) fn build_service() -> (
    ProjectService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ProjectService::new(
        repository.clone(),
        notifier.clone(),
        FilePolicy::new(1_000_000),
    );
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ProjectId, ProjectRecord>>>,
}

impl ProjectRepository for MemoryRepository {
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
        guard.insert(record.id.clone(), record);
        Ok(())
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
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<ProjectNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<ProjectNotice> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, notice: ProjectNotice) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }

    fn notices_for(&self, recipient: &str) -> Result<Vec<ProjectNotice>, NotificationError> {
        Ok(self
            .events()
            .into_iter()
            .filter(|notice| notice.recipient == recipient)
            .collect())
    }
}

pub(super) struct OfflineNotifier;

impl NotificationPublisher for OfflineNotifier {
    fn publish(&self, _notice: ProjectNotice) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp relay offline".to_string()))
    }

    fn notices_for(&self, _recipient: &str) -> Result<Vec<ProjectNotice>, NotificationError> {
        Err(NotificationError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl ProjectRepository for ConflictRepository {
    fn insert(&self, _record: ProjectRecord) -> Result<ProjectRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ProjectRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self, _filter: &ProjectFilter) -> Result<Vec<ProjectRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn delete(&self, _id: &ProjectId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl ProjectRepository for UnavailableRepository {
    fn insert(&self, _record: ProjectRecord) -> Result<ProjectRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ProjectRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &ProjectFilter) -> Result<Vec<ProjectRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ProjectId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: ProjectService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    project_router(Arc::new(service))
}

pub(super) fn request(
    method: &str,
    uri: &str,
    user: Option<(&str, &str)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user_id, role)) = user {
        builder = builder
            .header(USER_ID_HEADER, user_id)
            .header(USER_ROLE_HEADER, role);
    }
    match body {
        Some(payload) => builder
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
