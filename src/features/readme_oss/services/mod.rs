mod agent_run_service;
mod cleared_getter;
mod copyright_cleared_service;
mod license_cleared_service;
mod report_builder;
mod report_record_service;
mod report_writer;
mod upload_aggregator;
mod upload_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use agent_run_service::AgentRunService;
pub use cleared_getter::ClearedGetter;
pub use copyright_cleared_service::CopyrightClearedService;
pub use license_cleared_service::LicenseClearedService;
pub use report_record_service::{ReportRecordService, ReportRecordStore};
pub use report_writer::ReportWriter;
pub use upload_aggregator::UploadAggregator;
pub use upload_service::{UploadLookup, UploadService};
