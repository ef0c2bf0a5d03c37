use clap::Parser;

use crate::core::error::{AppError, Result};
use crate::features::scheduler::JobInfo;

/// Arguments the scheduler passes when it starts the agent
#[derive(Debug, Clone, Parser)]
#[command(name = "readmeoss", version, about = "Render cleared statements into a ReadMe OSS report")]
pub struct JobArgs {
    /// User who queued the job
    #[arg(long = "userID")]
    pub user_id: i32,

    /// Group whose clearing decisions are reported
    #[arg(long = "groupID")]
    pub group_id: i32,

    #[arg(long = "jobId")]
    pub job_id: i32,

    /// Comma-separated uploads merged into the primary upload's report
    #[arg(long = "uploadsAdd")]
    pub uploads_add: Option<String>,

    /// Speak the scheduler protocol on stdout
    #[arg(long = "scheduler_start")]
    pub scheduler_start: bool,
}

impl JobArgs {
    pub fn job_info(&self) -> JobInfo {
        JobInfo {
            job_id: self.job_id,
            group_id: self.group_id,
            user_id: self.user_id,
        }
    }

    pub fn additional_upload_ids(&self) -> Result<Vec<i32>> {
        parse_upload_ids(self.uploads_add.as_deref().unwrap_or_default())
    }
}

/// Parse a comma-separated upload id list.
///
/// Blank entries are skipped, duplicates are kept, anything that is not a
/// positive integer is rejected.
pub fn parse_upload_ids(raw: &str) -> Result<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<i32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AppError::Validation(format!("Invalid upload id '{}'", s))),
        })
        .collect()
}
