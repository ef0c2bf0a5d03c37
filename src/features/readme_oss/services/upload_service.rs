use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::readme_oss::models::Upload;

#[async_trait]
pub trait UploadLookup: Send + Sync {
    /// Fails with `NotFound` when the upload does not exist
    async fn get_upload(&self, upload_id: i32) -> Result<Upload>;
}

/// Service for upload metadata
pub struct UploadService {
    pool: PgPool,
}

impl UploadService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadLookup for UploadService {
    async fn get_upload(&self, upload_id: i32) -> Result<Upload> {
        sqlx::query_as::<_, Upload>(
            r#"
            SELECT upload_pk, upload_filename
            FROM upload
            WHERE upload_pk = $1
            "#,
        )
        .bind(upload_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get upload {}: {:?}", upload_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", upload_id)))
    }
}
