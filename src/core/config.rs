use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub agent: AgentConfig,
    pub database: DatabaseConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub name: String,
    pub version: String,
    /// Period of the liveness beat sent to the scheduler
    pub heartbeat_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Where generated ReadMe OSS files land
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            agent: AgentConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            report: ReportConfig::from_env()?,
        })
    }
}

impl AgentConfig {
    pub const AGENT_NAME: &'static str = "readmeoss";
    const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let heartbeat_secs = env::var("HEARTBEAT_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_HEARTBEAT_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "HEARTBEAT_INTERVAL_SECS must be a valid number".to_string())?;

        if heartbeat_secs == 0 {
            return Err("HEARTBEAT_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            name: Self::AGENT_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            heartbeat_interval: Duration::from_secs(heartbeat_secs),
        })
    }
}

impl DatabaseConfig {
    // One report per run, the pool never needs more than a couple of connections
    const DEFAULT_MAX_CONNECTIONS: u32 = 2;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl ReportConfig {
    const DEFAULT_REPOSITORY_PATH: &'static str = "/srv/fossology/repository";
    const REPORT_SUBDIR: &'static str = "report";

    pub fn from_env() -> Result<Self, String> {
        Ok(Self::resolve(
            env::var("REPORT_DIR").ok(),
            env::var("REPOSITORY_PATH").ok(),
        ))
    }

    /// An explicit report dir wins, otherwise reports go under `<repository>/report`
    fn resolve(report_dir: Option<String>, repository_path: Option<String>) -> Self {
        let output_dir = match report_dir.filter(|s| !s.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(
                repository_path
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| Self::DEFAULT_REPOSITORY_PATH.to_string()),
            )
            .join(Self::REPORT_SUBDIR),
        };

        Self { output_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_dir_defaults_under_repository() {
        let config = ReportConfig::resolve(None, None);
        assert_eq!(
            config.output_dir,
            PathBuf::from("/srv/fossology/repository/report")
        );
    }

    #[test]
    fn test_report_dir_follows_repository_path() {
        let config = ReportConfig::resolve(None, Some("/data/repo".to_string()));
        assert_eq!(config.output_dir, PathBuf::from("/data/repo/report"));
    }

    #[test]
    fn test_explicit_report_dir_wins() {
        let config = ReportConfig::resolve(
            Some("/tmp/reports".to_string()),
            Some("/data/repo".to_string()),
        );
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_blank_report_dir_is_ignored() {
        let config = ReportConfig::resolve(Some("  ".to_string()), None);
        assert_eq!(
            config.output_dir,
            PathBuf::from("/srv/fossology/repository/report")
        );
    }
}
