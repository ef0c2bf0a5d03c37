use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Connect to the host system's database.
///
/// The agent never owns the schema, so no migrations run here.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        "Connecting to {} (max_connections={}, acquire_timeout={}s)",
        redact_url(&config.url),
        config.max_connections,
        config.acquire_timeout_secs
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Mask the password of a connection URL so it can be logged
pub fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let Some(at) = url[authority_start..].find('@') else {
        return url.to_string();
    };
    let userinfo = &url[authority_start..authority_start + at];

    match userinfo.split_once(':') {
        Some((user, _)) => format!(
            "{}{}:***{}",
            &url[..authority_start],
            user,
            &url[authority_start + at..]
        ),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_masks_password() {
        assert_eq!(
            redact_url("postgres://fossy:secret@db:5432/fossology"),
            "postgres://fossy:***@db:5432/fossology"
        );
    }

    #[test]
    fn test_redact_url_without_password() {
        assert_eq!(
            redact_url("postgres://fossy@db/fossology"),
            "postgres://fossy@db/fossology"
        );
        assert_eq!(redact_url("postgres://db/fossology"), "postgres://db/fossology");
        assert_eq!(redact_url("not a url"), "not a url");
    }
}
