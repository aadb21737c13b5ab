//! Repositories for database operations

use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use common::models::{Member, Project, UserIdentity};

const PROJECT_COLUMNS: &str = "id, owner_id, name, url, members, checked, analyzer_results, \
                               monitor_history, metrics_history, questionnaire, created_at, updated_at";

/// Project repository for database operations
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the projects table if this is a fresh database
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id UUID PRIMARY KEY,
                owner_id TEXT,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                members JSONB NOT NULL DEFAULT '[]'::jsonb,
                checked JSONB NOT NULL DEFAULT '{}'::jsonb,
                analyzer_results JSONB,
                monitor_history JSONB NOT NULL DEFAULT '[]'::jsonb,
                metrics_history JSONB NOT NULL DEFAULT '[]'::jsonb,
                questionnaire JSONB,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a new project owned by the given user
    pub async fn create(&self, owner: &UserIdentity, name: &str, url: &str) -> Result<Project> {
        info!("Creating project {} for owner {}", name, owner.uid);

        let now = Utc::now();
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO projects (id, owner_id, name, url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(id)
        .bind(&owner.uid)
        .bind(name)
        .bind(url)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id,
            owner_id: Some(owner.uid.clone()),
            name: name.to_string(),
            url: url.to_string(),
            members: vec![],
            checked: HashMap::new(),
            analyzer_results: None,
            monitor_history: vec![],
            metrics_history: vec![],
            questionnaire: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Find a project by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// List every project the user owns or is a member of
    pub async fn list_for_user(&self, uid: &str) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE owner_id = $1
               OR members @> jsonb_build_array(jsonb_build_object('uid', $1::text))
            ORDER BY created_at DESC
            "#
        ))
        .bind(uid)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    /// Replace the project's member list
    pub async fn update_members(&self, id: Uuid, members: &[Member]) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET members = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(serde_json::to_value(members)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the completion state of one checklist item
    pub async fn set_checklist_item(&self, id: Uuid, item_id: &str, checked: bool) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET checked = jsonb_set(checked, ARRAY[$2::text], to_jsonb($3::boolean), true),
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(item_id)
        .bind(checked)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a project
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        info!("Deleting project {}", id);

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
