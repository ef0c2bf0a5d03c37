use async_trait::async_trait;

use crate::core::error::Result;

/// Identity of the job the scheduler started us for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobInfo {
    pub job_id: i32,
    pub group_id: i32,
    pub user_id: i32,
}

/// What the report logic needs from the host scheduler.
///
/// Progress reports are advisory liveness signals, never cancellation points.
#[async_trait]
pub trait JobContext: Send + Sync {
    fn job(&self) -> JobInfo;

    fn job_id(&self) -> i32 {
        self.job().job_id
    }

    fn group_id(&self) -> i32 {
        self.job().group_id
    }

    fn user_id(&self) -> i32 {
        self.job().user_id
    }

    /// Add `processed` items to the running total and mark the job alive
    fn report_progress(&self, processed: u64);

    /// Called once an upload's report has been written and recorded
    async fn complete(&self, upload_id: i32) -> Result<()>;
}
