use std::sync::Arc;

use crate::core::error::Result;
use crate::features::readme_oss::models::{CopyrightStatement, LicenseStatement, ReportContents};
use crate::features::readme_oss::services::ClearedGetter;
use crate::features::scheduler::JobContext;

/// Merges cleared statements of the primary upload and any additional uploads
pub struct UploadAggregator {
    licenses: Arc<dyn ClearedGetter<LicenseStatement>>,
    copyrights: Arc<dyn ClearedGetter<CopyrightStatement>>,
}

impl UploadAggregator {
    pub fn new(
        licenses: Arc<dyn ClearedGetter<LicenseStatement>>,
        copyrights: Arc<dyn ClearedGetter<CopyrightStatement>>,
    ) -> Self {
        Self {
            licenses,
            copyrights,
        }
    }

    /// Fetch the primary upload first, then each additional upload in order.
    ///
    /// Progress goes to the job context after every fetch, empty ones included.
    pub async fn aggregate(
        &self,
        ctx: &dyn JobContext,
        primary_upload_id: i32,
        additional_upload_ids: &[i32],
    ) -> Result<ReportContents> {
        let group_id = ctx.group_id();
        let mut contents = ReportContents::default();

        ctx.report_progress(0);

        for &upload_id in std::iter::once(&primary_upload_id).chain(additional_upload_ids) {
            let licenses = self.licenses.get_cleared(upload_id, group_id).await?;
            ctx.report_progress(licenses.len() as u64);

            let copyrights = self.copyrights.get_cleared(upload_id, group_id).await?;
            ctx.report_progress(copyrights.len() as u64);

            if licenses.is_empty() && copyrights.is_empty() {
                tracing::debug!("Upload {} has no cleared statements", upload_id);
            } else {
                tracing::debug!(
                    "Upload {}: {} licenses, {} copyrights",
                    upload_id,
                    licenses.len(),
                    copyrights.len()
                );
            }

            contents.licenses.extend(licenses.statements);
            contents.copyrights.extend(copyrights.statements);
        }

        tracing::info!(
            "Aggregated {} uploads for upload {}: {} licenses, {} copyrights",
            additional_upload_ids.len() + 1,
            primary_upload_id,
            contents.licenses.len(),
            contents.copyrights.len()
        );
        Ok(contents)
    }
}
