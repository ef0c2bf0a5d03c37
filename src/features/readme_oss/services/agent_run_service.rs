use sqlx::PgPool;

use crate::core::error::{AppError, Result};

/// Bookkeeping the scheduler expects every agent to set up on connect
pub struct AgentRunService {
    pool: PgPool,
}

impl AgentRunService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Make sure `<agent>_ars` exists, inheriting the shared `ars_master` layout
    pub async fn ensure_ars_table(&self, agent_name: &str) -> Result<()> {
        let table = ars_table_name(agent_name)?;

        // Identifiers cannot be bound, the name is validated above
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} () INHERITS (ars_master)",
            table
        );

        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create agent run table {}: {:?}", table, e);
                AppError::Database(e)
            })?;

        tracing::debug!("Agent run table {} ready", table);
        Ok(())
    }
}

fn ars_table_name(agent_name: &str) -> Result<String> {
    let valid = !agent_name.is_empty()
        && agent_name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !valid {
        return Err(AppError::Validation(format!(
            "Invalid agent name '{}'",
            agent_name
        )));
    }

    Ok(format!("{}_ars", agent_name))
}
