use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ProjectDraft, ProjectId, ProjectRecord, ProjectView, Requester, Role};
use super::repository::{NotificationPublisher, ProjectRepository, RepositoryError};
use super::service::{ProjectService, ProjectServiceError};
use crate::workflows::files::UploadedFile;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Router exposing project storage, files, notifications, and admin reports.
pub fn project_router<R, N>(service: Arc<ProjectService<R, N>>) -> Router
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects",
            post(create_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route(
            "/api/v1/projects/:project_id",
            get(get_handler::<R, N>)
                .put(update_handler::<R, N>)
                .delete(delete_handler::<R, N>),
        )
        .route(
            "/api/v1/projects/:project_id/files",
            post(attach_file_handler::<R, N>).delete(remove_file_handler::<R, N>),
        )
        .route("/api/v1/notifications", get(notifications_handler::<R, N>))
        .route(
            "/api/v1/admin/reports/summary",
            get(report_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/reports/projects.csv",
            get(export_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubmitQuery {
    #[serde(default)]
    pub(crate) submit: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveFileQuery {
    pub(crate) path: String,
}

/// Identity asserted by the upstream auth proxy.
pub(crate) fn requester_from_headers(headers: &HeaderMap) -> Result<Requester, Response> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let Some(user_id) = user_id else {
        let payload = json!({ "error": "missing x-user-id header" });
        return Err((StatusCode::UNAUTHORIZED, Json(payload)).into_response());
    };

    let role = Role::from_header(
        headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok()),
    );

    Ok(Requester {
        user_id: user_id.to_string(),
        role,
    })
}

pub(crate) fn error_response(error: ProjectServiceError) -> Response {
    let (status, payload) = match &error {
        ProjectServiceError::Incomplete { missing } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": error.to_string(), "missing": missing }),
        ),
        ProjectServiceError::File(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": error.to_string() }),
        ),
        ProjectServiceError::Forbidden => {
            (StatusCode::FORBIDDEN, json!({ "error": error.to_string() }))
        }
        ProjectServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, json!({ "error": "project not found" }))
        }
        ProjectServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, json!({ "error": "project already exists" }))
        }
        ProjectServiceError::Repository(_)
        | ProjectServiceError::Notification(_)
        | ProjectServiceError::Report(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    };
    (status, Json(payload)).into_response()
}

fn view_response(status: StatusCode, record: ProjectRecord) -> Response {
    (status, Json(record.view())).into_response()
}

pub(crate) async fn create_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
    Query(query): Query<SubmitQuery>,
    Json(draft): Json<ProjectDraft>,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    let result = if query.submit {
        service.submit(&requester, draft)
    } else {
        service.save_draft(&requester, draft)
    };

    match result {
        Ok(record) => view_response(StatusCode::CREATED, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.list(&requester) {
        Ok(records) => {
            let views: Vec<ProjectView> = records.iter().map(ProjectRecord::view).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.get(&requester, &ProjectId(project_id)) {
        Ok(record) => view_response(StatusCode::OK, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
    Path(project_id): Path<String>,
    Query(query): Query<SubmitQuery>,
    Json(draft): Json<ProjectDraft>,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    let id = ProjectId(project_id);
    let result = if query.submit {
        service.submit_existing(&requester, &id, draft)
    } else {
        service.update(&requester, &id, draft)
    };

    match result {
        Ok(record) => view_response(StatusCode::OK, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.delete(&requester, &ProjectId(project_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn attach_file_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
    Path(project_id): Path<String>,
    Json(file): Json<UploadedFile>,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.attach_file(&requester, &ProjectId(project_id), file) {
        Ok(record) => view_response(StatusCode::CREATED, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_file_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
    Path(project_id): Path<String>,
    Query(query): Query<RemoveFileQuery>,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.remove_file(&requester, &ProjectId(project_id), &query.path) {
        Ok(record) => view_response(StatusCode::OK, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn notifications_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.notifications(&requester) {
        Ok(notices) => (StatusCode::OK, Json(notices)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.report(&requester) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<Arc<ProjectService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: ProjectRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let requester = match requester_from_headers(&headers) {
        Ok(requester) => requester,
        Err(response) => return response,
    };

    match service.export_csv(&requester) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
