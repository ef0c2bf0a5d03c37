use std::path::PathBuf;

/// Row linking an upload and a job run to the generated file.
///
/// Downstream consumers find reports only through this row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub upload_id: i32,
    pub job_id: i32,
    pub file_path: PathBuf,
}
