//! Persisted store — the whole application state lives as one JSON blob
//! under a fixed key in a pre-built key-value store.
//!
//! Updates are last-writer-wins, single-actor: handlers load the snapshot,
//! mutate it, and save it back.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::session::AppSnapshot;

/// The fixed key holding the serialized application state.
pub const STATE_KEY: &str = "talentloop:state:v1";

/// Storage seam for the persisted snapshot.
///
/// Carried in `AppState` as `Arc<dyn SessionStore>`. Production uses
/// `RedisStore`; tests use `MemoryStore`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<AppSnapshot>;
    async fn save(&self, snapshot: &AppSnapshot) -> Result<()>;
}

/// Redis-backed store. One blob, one key.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Invalid Redis URL")?;
        info!("Redis client initialized");
        Ok(RedisStore { client })
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn load(&self) -> Result<AppSnapshot> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;
        let raw: Option<String> = conn
            .get(STATE_KEY)
            .await
            .context("Failed to read persisted state")?;
        match raw {
            Some(blob) => {
                serde_json::from_str(&blob).context("Persisted state blob is not valid JSON")
            }
            None => Ok(AppSnapshot::default()),
        }
    }

    async fn save(&self, snapshot: &AppSnapshot) -> Result<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;
        let blob = serde_json::to_string(snapshot).context("Failed to serialize state")?;
        let _: () = conn
            .set(STATE_KEY, blob)
            .await
            .context("Failed to write persisted state")?;
        Ok(())
    }
}

/// In-memory store used by tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<AppSnapshot>,
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<AppSnapshot> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, snapshot: &AppSnapshot) -> Result<()> {
        *self.inner.write().await = snapshot.clone();
        Ok(())
    }
}
