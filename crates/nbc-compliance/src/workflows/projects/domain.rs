use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::calculator::{
    pending_items, Category, CategoryPoints, CompliancePath, ComplianceTier, PendingItems, Scorecard,
    Selections,
};
use crate::workflows::files::UploadedFile;

/// Identifier wrapper for stored projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Submitted,
}

impl ProjectStatus {
    pub const fn ordered() -> [Self; 2] {
        [Self::Draft, Self::Submitted]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Submitted => "submitted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    /// Only `admin` elevates; anything else is treated as a regular member.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|raw| raw.trim().to_ascii_lowercase()) {
            Some(role) if role == "admin" => Role::Admin,
            _ => Role::Member,
        }
    }
}

/// Authenticated caller, as asserted by the hosted identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub user_id: String,
    pub role: Role,
}

impl Requester {
    pub fn member(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Member,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can_access(&self, record: &ProjectRecord) -> bool {
        self.is_admin() || record.owner_id == self.user_id
    }
}

/// Form state sent on save, submit, or edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[serde(default)]
    pub selections: Selections,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
}

/// Persisted project summary with the score captured at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub owner_id: String,
    pub status: ProjectStatus,
    pub compliance_path: Option<CompliancePath>,
    pub selections: Selections,
    pub category_points: BTreeMap<Category, f64>,
    pub total_points: f64,
    pub compliance: ComplianceTier,
    pub uploaded_files: Vec<UploadedFile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn new(
        id: ProjectId,
        owner_id: String,
        status: ProjectStatus,
        draft: ProjectDraft,
        now: DateTime<Utc>,
    ) -> Self {
        let Scorecard {
            breakdown,
            total_points,
            compliance,
            ..
        } = Scorecard::evaluate(&draft.selections);
        Self {
            id,
            owner_id,
            status,
            compliance_path: draft.selections.compliance_path(),
            selections: draft.selections,
            category_points: points_by_category(&breakdown),
            total_points,
            compliance,
            uploaded_files: draft.uploaded_files,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the form state and refresh the score snapshot.
    pub fn apply(&mut self, draft: ProjectDraft, now: DateTime<Utc>) {
        self.selections = draft.selections;
        self.uploaded_files = draft.uploaded_files;
        self.rescore();
        self.updated_at = now;
    }

    pub fn rescore(&mut self) {
        let scorecard = Scorecard::evaluate(&self.selections);
        self.compliance_path = self.selections.compliance_path();
        self.category_points = points_by_category(&scorecard.breakdown);
        self.total_points = scorecard.total_points;
        self.compliance = scorecard.compliance;
    }

    pub fn pending(&self) -> PendingItems {
        pending_items(&self.selections, &self.uploaded_files)
    }

    pub fn province(&self) -> Option<&str> {
        self.selections.province.as_deref()
    }

    pub fn view(&self) -> ProjectView {
        ProjectView {
            record: self.clone(),
            pending: self.pending(),
        }
    }
}

fn points_by_category(breakdown: &[CategoryPoints]) -> BTreeMap<Category, f64> {
    breakdown
        .iter()
        .map(|entry| (entry.category, entry.points))
        .collect()
}

/// API representation of a project with its current pending items.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub record: ProjectRecord,
    pub pending: PendingItems,
}
