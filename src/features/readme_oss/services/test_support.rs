//! In-memory stand-ins for the stores and the scheduler.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::error::{AppError, Result};
use crate::features::readme_oss::models::{
    ClearedStatements, CopyrightStatement, LicenseStatement, ReportRecord, Upload,
};
use crate::features::readme_oss::services::{ClearedGetter, ReportRecordStore, UploadLookup};
use crate::features::scheduler::{JobContext, JobInfo};

pub fn license(text: &str) -> LicenseStatement {
    LicenseStatement {
        license_id: 1,
        content: text.to_string(),
        text: text.to_string(),
        files: Vec::new(),
    }
}

pub fn copyright(content: &str) -> CopyrightStatement {
    CopyrightStatement {
        content: content.to_string(),
        files: Vec::new(),
    }
}

pub struct FakeGetter<T> {
    statements: HashMap<i32, Vec<T>>,
    failing_upload: Option<i32>,
    calls: Mutex<Vec<(i32, i32)>>,
}

impl<T> Default for FakeGetter<T> {
    fn default() -> Self {
        Self {
            statements: HashMap::new(),
            failing_upload: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<T> FakeGetter<T> {
    pub fn with(mut self, upload_id: i32, statements: Vec<T>) -> Self {
        self.statements.insert(upload_id, statements);
        self
    }

    pub fn failing_for(mut self, upload_id: i32) -> Self {
        self.failing_upload = Some(upload_id);
        self
    }

    pub fn calls(&self) -> Vec<(i32, i32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T> ClearedGetter<T> for FakeGetter<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get_cleared(&self, upload_id: i32, group_id: i32) -> Result<ClearedStatements<T>> {
        self.calls.lock().unwrap().push((upload_id, group_id));

        if self.failing_upload == Some(upload_id) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        Ok(ClearedStatements {
            statements: self.statements.get(&upload_id).cloned().unwrap_or_default(),
        })
    }
}

#[derive(Default)]
pub struct FakeUploads {
    uploads: HashMap<i32, String>,
}

impl FakeUploads {
    pub fn with(mut self, upload_id: i32, filename: &str) -> Self {
        self.uploads.insert(upload_id, filename.to_string());
        self
    }
}

#[async_trait]
impl UploadLookup for FakeUploads {
    async fn get_upload(&self, upload_id: i32) -> Result<Upload> {
        self.uploads
            .get(&upload_id)
            .map(|filename| Upload {
                upload_pk: upload_id,
                upload_filename: filename.clone(),
            })
            .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", upload_id)))
    }
}

#[derive(Default)]
pub struct FakeRecords {
    inserted: Mutex<Vec<ReportRecord>>,
    failing: bool,
}

impl FakeRecords {
    pub fn failing() -> Self {
        Self {
            inserted: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn inserted(&self) -> Vec<ReportRecord> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRecordStore for FakeRecords {
    async fn insert(&self, record: &ReportRecord) -> Result<()> {
        if self.failing {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        self.inserted.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Job context that remembers every progress report and completion
pub struct RecordingContext {
    job: JobInfo,
    progress: Mutex<Vec<u64>>,
    completed: Mutex<Vec<i32>>,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self {
            job: JobInfo {
                job_id: 77,
                group_id: 4,
                user_id: 9,
            },
            progress: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingContext {
    pub fn progress(&self) -> Vec<u64> {
        self.progress.lock().unwrap().clone()
    }

    pub fn completed(&self) -> Vec<i32> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobContext for RecordingContext {
    fn job(&self) -> JobInfo {
        self.job
    }

    fn report_progress(&self, processed: u64) {
        self.progress.lock().unwrap().push(processed);
    }

    async fn complete(&self, upload_id: i32) -> Result<()> {
        self.completed.lock().unwrap().push(upload_id);
        Ok(())
    }
}
