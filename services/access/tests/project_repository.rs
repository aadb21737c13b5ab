//! Integration tests for the project repository
//!
//! These tests need a live PostgreSQL instance (`DATABASE_URL`) and are
//! ignored by default; run them with `cargo test -- --ignored`.

use chrono::Utc;
use common::database::{DatabaseConfig, init_pool};
use common::models::{Member, UserIdentity};
use common::roles::Role;

#[tokio::test]
#[ignore = "requires local PostgreSQL"]
async fn test_project_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;

    let repo = access::repositories::ProjectRepository::new(pool);
    repo.ensure_schema().await?;

    let owner = UserIdentity::new("it-owner");
    let project = repo
        .create(&owner, "Integration project", "https://example.com")
        .await?;

    // Fresh project round-trips with its owner and no members
    let loaded = repo.find_by_id(project.id).await?.expect("project missing");
    assert_eq!(loaded.owner_id.as_deref(), Some("it-owner"));
    assert!(loaded.members.is_empty());

    // Member list updates persist in order
    let members = vec![Member {
        uid: "it-member".to_string(),
        role: Role::Editor,
        display_name: None,
        email: None,
        added_at: Utc::now(),
    }];
    assert!(repo.update_members(project.id, &members).await?);

    let loaded = repo.find_by_id(project.id).await?.expect("project missing");
    assert_eq!(loaded.members.len(), 1);
    assert_eq!(loaded.members[0].role, Role::Editor);

    // Membership makes the project visible in the member's listing
    let listed = repo.list_for_user("it-member").await?;
    assert!(listed.iter().any(|p| p.id == project.id));

    // Checklist toggles land in the JSONB map
    assert!(repo.set_checklist_item(project.id, "item-1", true).await?);
    let loaded = repo.find_by_id(project.id).await?.expect("project missing");
    assert_eq!(loaded.checked.get("item-1"), Some(&true));

    // Delete removes the row
    assert!(repo.delete(project.id).await?);
    assert!(repo.find_by_id(project.id).await?.is_none());

    Ok(())
}
