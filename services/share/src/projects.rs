//! Read-only project lookups for the share service
//!
//! Sharing needs the project twice: once to build the snapshot and once
//! to resolve the caller's role. Everything else about projects belongs
//! to the access service, so this reader exposes lookups only.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use common::models::Project;

/// Read-only project repository
#[derive(Clone)]
pub struct ProjectReader {
    pool: PgPool,
}

impl ProjectReader {
    /// Create a new project reader
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, name, url, members, checked, analyzer_results,
                   monitor_history, metrics_history, questionnaire, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }
}
