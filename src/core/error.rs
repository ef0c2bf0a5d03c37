use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scheduler protocol error: {0}")]
    Protocol(String),
}

impl AppError {
    /// Exit code reported to the scheduler for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_exit_with_usage_code() {
        let err = AppError::Validation("bad upload id".to_string());
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Validation error: bad upload id");
    }

    #[test]
    fn test_other_errors_exit_with_failure_code() {
        assert_eq!(AppError::NotFound("upload 7".to_string()).exit_code(), 1);
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(AppError::from(io).exit_code(), 1);
    }
}
