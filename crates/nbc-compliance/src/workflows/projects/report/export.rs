use super::views::ProjectRow;
use crate::workflows::projects::domain::ProjectRecord;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv export: {0}")]
    Flush(String),
    #[error("csv export is not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl ProjectRecord {
    pub fn export_row(&self) -> ProjectRow<'_> {
        ProjectRow {
            id: &self.id.0,
            owner: &self.owner_id,
            status: self.status.label(),
            path: self.compliance_path.map_or("", |path| path.code()),
            province: self.province().unwrap_or_default(),
            building_type: self.selections.building_type.as_deref().unwrap_or_default(),
            total_points: self.total_points,
            tier: self.compliance.tier.label(),
            files: self.uploaded_files.len(),
        }
    }
}

/// Render projects as CSV, one row per project with a header line.
pub fn export_csv<'a>(
    records: impl IntoIterator<Item = &'a ProjectRecord>,
) -> Result<String, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    let mut wrote_any = false;
    for record in records {
        writer.serialize(record.export_row())?;
        wrote_any = true;
    }
    if !wrote_any {
        writer.write_record([
            "id",
            "owner",
            "status",
            "path",
            "province",
            "building_type",
            "total_points",
            "tier",
            "files",
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Flush(err.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
