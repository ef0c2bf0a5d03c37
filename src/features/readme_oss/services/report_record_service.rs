use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::readme_oss::models::ReportRecord;

#[async_trait]
pub trait ReportRecordStore: Send + Sync {
    async fn insert(&self, record: &ReportRecord) -> Result<()>;
}

/// Writes `reportgen` rows, the only way downstream consumers discover a report
pub struct ReportRecordService {
    pool: PgPool,
}

impl ReportRecordService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRecordStore for ReportRecordService {
    async fn insert(&self, record: &ReportRecord) -> Result<()> {
        let file_path = record.file_path.to_str().ok_or_else(|| {
            AppError::Validation(format!(
                "Report path {} is not valid UTF-8",
                record.file_path.display()
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO reportgen (upload_fk, job_fk, filepath)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.upload_id)
        .bind(record.job_id)
        .bind(file_path)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to record report for upload {} (job {}): {:?}",
                record.upload_id,
                record.job_id,
                e
            );
            AppError::Database(e)
        })?;

        tracing::info!(
            "Report recorded for upload {} (job {}): {}",
            record.upload_id,
            record.job_id,
            file_path
        );
        Ok(())
    }
}
