use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::readme_oss::models::{ClearedStatements, CopyrightRow, CopyrightStatement};
use crate::features::readme_oss::services::cleared_getter::{group_statements, ClearedGetter};

/// Only findings that read like a copyright notice make it into the report
const COPYRIGHT_CONTENT_PATTERN: &str = "Copyright%";

/// Reads the enabled copyright findings of an upload
pub struct CopyrightClearedService {
    pool: PgPool,
    content_pattern: String,
}

impl CopyrightClearedService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            content_pattern: COPYRIGHT_CONTENT_PATTERN.to_string(),
        }
    }

    async fn fetch_rows(&self, upload_id: i32) -> Result<Vec<CopyrightRow>> {
        sqlx::query_as::<_, CopyrightRow>(
            r#"
            SELECT c.content, ut.ufile_name AS file_name
            FROM copyright c
            INNER JOIN uploadtree ut ON ut.pfile_fk = c.pfile_fk
            WHERE ut.upload_fk = $1
            AND c.is_enabled
            AND c.content ILIKE $2
            ORDER BY c.content, ut.ufile_name
            "#,
        )
        .bind(upload_id)
        .bind(&self.content_pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to fetch copyrights for upload {}: {:?}",
                upload_id,
                e
            );
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl ClearedGetter<CopyrightStatement> for CopyrightClearedService {
    /// Copyright findings are not group-specific, `group_id` only scopes licenses
    async fn get_cleared(
        &self,
        upload_id: i32,
        _group_id: i32,
    ) -> Result<ClearedStatements<CopyrightStatement>> {
        let rows = self.fetch_rows(upload_id).await?;
        let statements = group_statements(rows.into_iter().map(CopyrightStatement::from));

        tracing::debug!(
            "Upload {}: {} copyright statements",
            upload_id,
            statements.len()
        );
        Ok(ClearedStatements { statements })
    }
}
