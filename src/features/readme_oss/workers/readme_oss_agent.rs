use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::core::error::Result;
use crate::features::readme_oss::services::{ReportWriter, UploadAggregator};
use crate::features::scheduler::{JobContext, SchedulerSession};

/// ReadMe OSS worker driven by the scheduler session.
///
/// Each upload goes Fetch → Aggregate → Render → Write File → Record with no
/// retries; the first failure ends the whole job.
pub struct ReadmeOssAgent {
    aggregator: UploadAggregator,
    writer: ReportWriter,
    additional_upload_ids: Vec<i32>,
}

impl ReadmeOssAgent {
    pub fn new(
        aggregator: UploadAggregator,
        writer: ReportWriter,
        additional_upload_ids: Vec<i32>,
    ) -> Self {
        Self {
            aggregator,
            writer,
            additional_upload_ids,
        }
    }

    /// Process uploads until the scheduler runs out of work, returns how many were done
    pub async fn run<R, W>(&self, session: &SchedulerSession<R, W>) -> Result<usize>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        tracing::info!(
            "Starting ReadMe OSS agent (additional uploads: {:?})",
            self.additional_upload_ids
        );

        let mut processed = 0;
        while let Some(upload_id) = session.next_upload().await? {
            self.process_upload(session, upload_id).await?;
            processed += 1;
        }

        Ok(processed)
    }

    /// Build and record the report for one primary upload
    pub async fn process_upload(&self, ctx: &dyn JobContext, upload_id: i32) -> Result<PathBuf> {
        tracing::info!(
            "Processing upload {} for job {} (group {})",
            upload_id,
            ctx.job_id(),
            ctx.group_id()
        );

        let contents = self
            .aggregator
            .aggregate(ctx, upload_id, &self.additional_upload_ids)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to collect statements for upload {}: {}", upload_id, e)
            })?;

        let path = self
            .writer
            .write_report(ctx, &contents, upload_id, &self.additional_upload_ids)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to write report for upload {}: {}", upload_id, e)
            })?;

        ctx.complete(upload_id).await?;

        tracing::info!("ReadMe OSS for upload {} completed", upload_id);
        Ok(path)
    }
}
