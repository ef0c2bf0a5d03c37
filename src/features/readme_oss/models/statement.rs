use sqlx::FromRow;

/// A statement that can be grouped with identical statements found in other files
pub trait Statement {
    type Key: Eq + std::hash::Hash;

    /// Identity used when folding duplicate rows of one upload together
    fn key(&self) -> Self::Key;

    /// Absorb a duplicate row of the same statement
    fn merge(&mut self, duplicate: Self);
}

/// Cleared license block as it appears in the report
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct LicenseStatement {
    pub license_id: i32,
    /// License short name
    pub content: String,
    /// Full license text rendered into the report
    pub text: String,
    pub files: Vec<String>,
}

/// Cleared copyright notice
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct CopyrightStatement {
    pub content: String,
    pub files: Vec<String>,
}

/// Result of one cleared-statement lookup for a single upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearedStatements<T> {
    pub statements: Vec<T>,
}

impl<T> ClearedStatements<T> {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl<T> Default for ClearedStatements<T> {
    fn default() -> Self {
        Self {
            statements: Vec::new(),
        }
    }
}

/// Everything rendered into one ReadMe OSS file, merged across uploads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContents {
    pub licenses: Vec<LicenseStatement>,
    pub copyrights: Vec<CopyrightStatement>,
}

impl Statement for LicenseStatement {
    type Key = (String, String);

    fn key(&self) -> Self::Key {
        (self.content.clone(), self.text.clone())
    }

    fn merge(&mut self, duplicate: Self) {
        merge_files(&mut self.files, duplicate.files);
    }
}

impl Statement for CopyrightStatement {
    type Key = String;

    fn key(&self) -> Self::Key {
        self.content.clone()
    }

    fn merge(&mut self, duplicate: Self) {
        merge_files(&mut self.files, duplicate.files);
    }
}

fn merge_files(files: &mut Vec<String>, more: Vec<String>) {
    for file in more {
        if !files.contains(&file) {
            files.push(file);
        }
    }
}

/// Row of the cleared-license query: one identified license on one file
#[derive(Debug, Clone, FromRow)]
pub struct ClearedLicenseRow {
    pub license_id: i32,
    pub shortname: String,
    pub license_text: Option<String>,
    pub file_name: String,
}

impl From<ClearedLicenseRow> for LicenseStatement {
    fn from(row: ClearedLicenseRow) -> Self {
        Self {
            license_id: row.license_id,
            content: row.shortname,
            text: row.license_text.unwrap_or_default(),
            files: vec![row.file_name],
        }
    }
}

/// Row of the copyright query: one notice found in one file
#[derive(Debug, Clone, FromRow)]
pub struct CopyrightRow {
    pub content: String,
    pub file_name: String,
}

impl From<CopyrightRow> for CopyrightStatement {
    fn from(row: CopyrightRow) -> Self {
        Self {
            content: row.content,
            files: vec![row.file_name],
        }
    }
}
