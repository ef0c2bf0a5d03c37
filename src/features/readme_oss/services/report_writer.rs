use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::core::config::ReportConfig;
use crate::core::error::Result;
use crate::features::readme_oss::models::{ReportContents, ReportRecord};
use crate::features::readme_oss::services::report_builder::generate_report;
use crate::features::readme_oss::services::{ReportRecordStore, UploadLookup};
use crate::features::scheduler::JobContext;

/// Owner read/write, everyone else read-only
const REPORT_FILE_MODE: u32 = 0o644;

/// Writes the rendered report to disk and records where it went
pub struct ReportWriter {
    config: ReportConfig,
    uploads: Arc<dyn UploadLookup>,
    records: Arc<dyn ReportRecordStore>,
}

impl ReportWriter {
    pub fn new(
        config: ReportConfig,
        uploads: Arc<dyn UploadLookup>,
        records: Arc<dyn ReportRecordStore>,
    ) -> Self {
        Self {
            config,
            uploads,
            records,
        }
    }

    /// Render, write and record the report of `primary_upload_id`.
    ///
    /// Every upload is resolved before anything touches the disk, so an
    /// unknown upload id leaves no file behind. A failed insert does leave the
    /// file on disk.
    pub async fn write_report(
        &self,
        ctx: &dyn JobContext,
        contents: &ReportContents,
        primary_upload_id: i32,
        additional_upload_ids: &[i32],
    ) -> Result<PathBuf> {
        let primary = self.uploads.get_upload(primary_upload_id).await?;

        let mut package_name = primary.upload_filename.clone();
        for &upload_id in additional_upload_ids {
            let upload = self.uploads.get_upload(upload_id).await?;
            package_name.push_str(", ");
            package_name.push_str(&upload.upload_filename);
        }

        let file_path = report_file_path(
            &self.config.output_dir,
            &primary.upload_filename,
            Utc::now().timestamp(),
        );

        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let report = generate_report(contents, &package_name);
        write_report_file(&file_path, &report).await?;
        tracing::info!(
            "Wrote ReadMe OSS for '{}' to {} ({} bytes)",
            package_name,
            file_path.display(),
            report.len()
        );

        self.records
            .insert(&ReportRecord {
                upload_id: primary_upload_id,
                job_id: ctx.job_id(),
                file_path: file_path.clone(),
            })
            .await?;

        Ok(file_path)
    }
}

/// `<dir>/ReadMe_OSS_<package>_<timestamp>.txt`
pub fn report_file_path(output_dir: &Path, package_name: &str, timestamp: i64) -> PathBuf {
    // A separator inside the upload name must not escape the report dir
    let package_name = package_name.replace(['/', '\\'], "_");
    output_dir.join(format!("ReadMe_OSS_{}_{}.txt", package_name, timestamp))
}

async fn write_report_file(path: &Path, report: &str) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(REPORT_FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(report.as_bytes()).await?;
    file.flush().await?;

    // An overwritten file keeps its old mode unless reset
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(REPORT_FILE_MODE))
            .await?;
    }

    Ok(())
}
