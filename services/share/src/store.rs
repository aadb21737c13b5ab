//! Dual-backend share-link store
//!
//! Shares live as one record per token, persisted either in Redis (the
//! remote backend) or in the local file store. The remote backend is
//! preferred when configured, but a share is never lost to a remote
//! outage: creation falls back to the local store, and redemption reads
//! the local store whenever the remote one misses or fails. Backend
//! selection happens once, at construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use common::cache::{RedisConfig, RedisPool};
use common::error::{StoreError, StoreResult};
use common::localstore::LocalStore;
use common::models::Project;

use crate::snapshot::ProjectSnapshot;
use crate::token;

/// Key of the single blob holding every locally-stored share
const SHARES_KEY: &str = "shares";

/// Redis key prefix for share records
const REMOTE_KEY_PREFIX: &str = "share:";

/// Share store configuration
#[derive(Debug, Clone)]
pub struct ShareConfig {
    /// Redis URL for the remote backend; the local backend serves alone
    /// when this is unset or not a plausible Redis URL
    pub redis_url: Option<String>,
    /// Directory for the local backend's files
    pub data_dir: PathBuf,
    /// Base URL that minted share links point at
    pub app_base_url: String,
}

impl ShareConfig {
    /// Create a new ShareConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SHARE_REDIS_URL`: Redis URL for the remote backend (optional)
    /// - `SHARE_DATA_DIR`: Local backend directory (default: "./data")
    /// - `APP_BASE_URL`: Base URL for minted links (default: "http://localhost:5173")
    pub fn from_env() -> Self {
        let redis_url = std::env::var("SHARE_REDIS_URL").ok();
        let data_dir = std::env::var("SHARE_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let app_base_url = std::env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        ShareConfig {
            redis_url,
            data_dir: data_dir.into(),
            app_base_url,
        }
    }

    /// Whether the remote backend should be used at all
    ///
    /// Deployments that never configured Redis often carry an empty or
    /// placeholder value, so only a URL with a Redis scheme counts.
    fn remote_configured(&self) -> Option<&str> {
        self.redis_url
            .as_deref()
            .filter(|url| url.starts_with("redis://") || url.starts_with("rediss://"))
    }
}

/// Persisted share record: who shared which project, and the snapshot a
/// token redeems to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareRecord {
    pub project_id: Uuid,
    pub user_id: String,
    pub snapshot: ProjectSnapshot,
    pub created_at: DateTime<Utc>,
}

/// Result of minting a share link
#[derive(Debug, Clone, Serialize)]
pub struct CreatedShare {
    pub token: String,
    pub url: String,
}

/// A locally-stored share record annotated with its token
#[derive(Debug, Clone, Serialize)]
pub struct StoredShare {
    pub token: String,
    #[serde(flatten)]
    pub record: ShareRecord,
}

/// Remote backend adapter over Redis
///
/// Every operation returns a result instead of logging-and-swallowing,
/// so the store above decides what a failure means.
#[derive(Clone)]
struct RemoteShares {
    pool: RedisPool,
}

impl RemoteShares {
    fn key(token: &str) -> String {
        format!("{REMOTE_KEY_PREFIX}{token}")
    }

    async fn try_read(&self, token: &str) -> StoreResult<Option<ShareRecord>> {
        let raw = self
            .pool
            .get(&Self::key(token))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn try_write(&self, token: &str, record: &ShareRecord) -> StoreResult<()> {
        let raw = serde_json::to_string(record)?;
        self.pool
            .set(&Self::key(token), &raw, None)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn try_delete(&self, token: &str) -> StoreResult<()> {
        self.pool
            .delete(&Self::key(token))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

/// Local backend adapter over the file store
///
/// All shares live in one JSON blob, so every read-modify-write cycle
/// holds the lock for its whole duration. A missing or unreadable blob
/// reads as "no shares"; it is never an error.
#[derive(Clone)]
struct LocalShares {
    store: LocalStore,
    lock: Arc<Mutex<()>>,
}

impl LocalShares {
    fn new(store: LocalStore) -> Self {
        Self {
            store,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn load(&self) -> BTreeMap<String, ShareRecord> {
        match self.store.get(SHARES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable share blob: {}", e);
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read share blob: {}", e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self, shares: &BTreeMap<String, ShareRecord>) -> StoreResult<()> {
        let raw = serde_json::to_string(shares)?;
        self.store.set(SHARES_KEY, &raw)
    }

    async fn try_read(&self, token: &str) -> StoreResult<Option<ShareRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().remove(token))
    }

    async fn try_write(&self, token: &str, record: &ShareRecord) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut shares = self.load();
        shares.insert(token.to_string(), record.clone());
        self.save(&shares)
    }

    async fn try_delete(&self, token: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut shares = self.load();
        if shares.remove(token).is_some() {
            self.save(&shares)?;
        }
        Ok(())
    }

    async fn list_for_project(&self, project_id: Uuid) -> Vec<StoredShare> {
        let _guard = self.lock.lock().await;
        self.load()
            .into_iter()
            .filter(|(_, record)| record.project_id == project_id)
            .map(|(token, record)| StoredShare { token, record })
            .collect()
    }
}

/// Share-link store over the configured backends
#[derive(Clone)]
pub struct ShareStore {
    remote: Option<RemoteShares>,
    local: LocalShares,
    app_base_url: String,
}

impl ShareStore {
    /// Build a store from its configuration
    ///
    /// The local backend always exists; the remote backend is attached
    /// only when configured. Remote connections are lazy, so an
    /// unreachable Redis shows up per-operation, not here.
    pub fn new(config: &ShareConfig) -> StoreResult<Self> {
        let remote = match config.remote_configured() {
            Some(url) => {
                let pool = RedisPool::new(&RedisConfig {
                    url: url.to_string(),
                })
                .map_err(|e| StoreError::Backend(e.to_string()))?;
                info!("Share store using remote backend with local fallback");
                Some(RemoteShares { pool })
            }
            None => {
                info!("Share store using local backend only");
                None
            }
        };

        let local = LocalShares::new(LocalStore::new(&config.data_dir)?);

        Ok(Self {
            remote,
            local,
            app_base_url: config.app_base_url.clone(),
        })
    }

    /// Mint a share link for a project
    ///
    /// The snapshot is fixed before anything is persisted; later project
    /// mutations never reach it. A remote write failure falls back to the
    /// local store so the minted link stays redeemable.
    pub async fn create_share_link(
        &self,
        project: &Project,
        user_id: &str,
    ) -> StoreResult<CreatedShare> {
        let token = token::generate();
        let record = ShareRecord {
            project_id: project.id,
            user_id: user_id.to_string(),
            snapshot: ProjectSnapshot::from_project(project),
            created_at: Utc::now(),
        };

        match &self.remote {
            Some(remote) => match remote.try_write(&token, &record).await {
                Ok(()) => {}
                Err(e) => {
                    warn!("Remote share write failed, falling back to local store: {}", e);
                    self.local.try_write(&token, &record).await?;
                }
            },
            None => self.local.try_write(&token, &record).await?,
        }

        info!("Created share link for project {}", project.id);

        let url = format!("{}?share={}", self.app_base_url, token);
        Ok(CreatedShare { token, url })
    }

    /// Redeem a token for its share record
    ///
    /// The remote backend is asked first when configured; any remote miss
    /// or failure falls through to the local store. Only a miss in both
    /// places is an error.
    pub async fn fetch_shared_project(&self, token: &str) -> StoreResult<ShareRecord> {
        if let Some(remote) = &self.remote {
            match remote.try_read(token).await {
                Ok(Some(record)) => return Ok(record),
                Ok(None) => {}
                Err(e) => warn!("Remote share read failed, trying local store: {}", e),
            }
        }

        match self.local.try_read(token).await? {
            Some(record) => Ok(record),
            None => Err(StoreError::NotFound),
        }
    }

    /// Revoke a share link
    ///
    /// The remote delete is best-effort. The local delete always runs: a
    /// record created under the remote backend may have been
    /// fallback-written locally, and removing a token that is not there
    /// is a no-op.
    pub async fn revoke_share_link(&self, token: &str) -> StoreResult<()> {
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.try_delete(token).await {
                warn!("Remote share delete failed: {}", e);
            }
        }

        self.local.try_delete(token).await?;

        info!("Revoked share link");
        Ok(())
    }

    /// List the locally-stored shares of a project
    ///
    /// This consults the local backend only; remote-only shares do not
    /// appear. Unknown project ids yield an empty list, never an error.
    pub async fn project_shares(&self, project_id: Uuid) -> Vec<StoredShare> {
        self.local.list_for_project(project_id).await
    }
}
