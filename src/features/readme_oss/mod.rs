//! ReadMe OSS report generation: cleared statement retrieval, aggregation
//! across uploads, rendering and persistence.

pub mod models;
pub mod services;
pub mod workers;

pub use services::{
    AgentRunService, CopyrightClearedService, LicenseClearedService, ReportRecordService,
    ReportWriter, UploadAggregator, UploadService,
};
pub use workers::ReadmeOssAgent;
