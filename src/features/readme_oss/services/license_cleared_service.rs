use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::readme_oss::models::{
    ClearedLicenseRow, ClearedStatements, LicenseStatement,
};
use crate::features::readme_oss::services::cleared_getter::{group_statements, ClearedGetter};

/// `clearing_decision.decision_type` of a decision that identified licenses
const DECISION_TYPE_IDENTIFIED: i32 = 5;

/// Reads licenses the group concluded on, from each file's latest clearing decision
pub struct LicenseClearedService {
    pool: PgPool,
}

impl LicenseClearedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(&self, upload_id: i32, group_id: i32) -> Result<Vec<ClearedLicenseRow>> {
        sqlx::query_as::<_, ClearedLicenseRow>(
            r#"
            WITH latest_decisions AS (
                SELECT DISTINCT ON (cd.uploadtree_fk)
                    cd.clearing_decision_pk, cd.uploadtree_fk, cd.decision_type
                FROM clearing_decision cd
                INNER JOIN uploadtree ut ON ut.uploadtree_pk = cd.uploadtree_fk
                WHERE ut.upload_fk = $1 AND cd.group_fk = $2
                ORDER BY cd.uploadtree_fk, cd.date_added DESC, cd.clearing_decision_pk DESC
            )
            SELECT
                lr.rf_pk AS license_id,
                lr.rf_shortname AS shortname,
                lr.rf_text AS license_text,
                ut.ufile_name AS file_name
            FROM latest_decisions ld
            INNER JOIN clearing_decision_event cde
                ON cde.clearing_decision_fk = ld.clearing_decision_pk
            INNER JOIN clearing_event ce ON ce.clearing_event_pk = cde.clearing_event_fk
            INNER JOIN license_ref lr ON lr.rf_pk = ce.rf_fk
            INNER JOIN uploadtree ut ON ut.uploadtree_pk = ld.uploadtree_fk
            WHERE ld.decision_type = $3
            AND NOT ce.removed
            ORDER BY lr.rf_shortname, ut.ufile_name
            "#,
        )
        .bind(upload_id)
        .bind(group_id)
        .bind(DECISION_TYPE_IDENTIFIED)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to fetch cleared licenses for upload {}: {:?}",
                upload_id,
                e
            );
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl ClearedGetter<LicenseStatement> for LicenseClearedService {
    async fn get_cleared(
        &self,
        upload_id: i32,
        group_id: i32,
    ) -> Result<ClearedStatements<LicenseStatement>> {
        let rows = self.fetch_rows(upload_id, group_id).await?;
        let row_count = rows.len();

        let statements = group_statements(rows.into_iter().map(LicenseStatement::from));

        tracing::debug!(
            "Upload {}: {} cleared license rows grouped into {} statements",
            upload_id,
            row_count,
            statements.len()
        );
        Ok(ClearedStatements { statements })
    }
}
