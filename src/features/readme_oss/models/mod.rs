mod report_record;
mod statement;
mod upload;

pub use report_record::ReportRecord;
pub use statement::{
    ClearedLicenseRow, ClearedStatements, CopyrightRow, CopyrightStatement, LicenseStatement,
    ReportContents, Statement,
};
pub use upload::Upload;
