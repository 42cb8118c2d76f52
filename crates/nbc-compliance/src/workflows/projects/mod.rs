//! Saved compliance projects: drafts, submissions, supporting files,
//! notifications, and administrator reports.
//!
//! Every stored record carries the score snapshot computed when it was last
//! written; pending items are recomputed whenever a record is read.

pub mod domain;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ProjectDraft, ProjectId, ProjectRecord, ProjectStatus, ProjectView, Requester, Role,
};
pub use report::views::ProjectReportSummary;
pub use report::{export_csv, ProjectReport, ReportError};
pub use repository::{
    NotificationError, NotificationPublisher, ProjectFilter, ProjectNotice, ProjectRepository,
    RepositoryError, ADMIN_RECIPIENT,
};
pub use router::{project_router, USER_ID_HEADER, USER_ROLE_HEADER};
pub use service::{ProjectService, ProjectServiceError};
