//! Flat-file agent store
//!
//! Agents persist as a single pretty-printed JSON document with a metadata
//! block carrying the id counter. Records load leniently: malformed entries
//! are skipped with a warning instead of failing the whole file, and the
//! counter is clamped above every numeric id actually present so deleted
//! ids never come back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::agent::{Agent, AgentCategory, AgentStatus};
use crate::classifier::{HOTEL_AGENT_DESCRIPTION, HOTEL_AGENT_NAME, is_hotel_agent};

const STORE_VERSION: &str = "1.0.0";

/// Thread-safe store of agent records backed by a JSON file on disk.
///
/// All reads are served from memory; every mutation rewrites the file while
/// holding the write lock, so writers serialize and the file never sees a
/// half-applied change. Clones share the same underlying state.
#[derive(Clone)]
pub struct AgentStore {
    path: PathBuf,
    inner: Arc<RwLock<StoreInner>>,
}

struct StoreInner {
    agents: Vec<Agent>,
    next_id: u64,
}

/// Partial update applied to an existing agent. Absent fields are left
/// unchanged.
#[derive(Debug, Default)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub category: Option<AgentCategory>,
    pub status: Option<AgentStatus>,
    pub description: Option<String>,
}

#[derive(Serialize)]
struct StoreFile<'a> {
    agents: &'a [Agent],
    metadata: StoreMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreMetadata {
    next_id: u64,
    last_updated: DateTime<Utc>,
    version: &'static str,
}

impl AgentStore {
    /// Open the store at `path`, loading existing records if the file is
    /// there and starting empty otherwise.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let inner = if path.exists() {
            load_file(&path)
                .await
                .with_context(|| format!("Failed to load agent store from {}", path.display()))?
        } else {
            debug!("No agent store at {}, starting empty", path.display());
            StoreInner {
                agents: Vec::new(),
                next_id: 1,
            }
        };

        info!(
            "Agent store ready with {} agents (next id {})",
            inner.agents.len(),
            inner.next_id
        );

        Ok(Self {
            path,
            inner: Arc::new(RwLock::new(inner)),
        })
    }

    /// All agents in insertion order.
    pub async fn list(&self) -> Vec<Agent> {
        self.inner.read().await.agents.clone()
    }

    /// Look up a single agent by id.
    pub async fn get(&self, id: &str) -> Option<Agent> {
        let inner = self.inner.read().await;
        inner.agents.iter().find(|a| a.id == id).cloned()
    }

    /// Create a new agent, assigning it the next id from the counter.
    pub async fn create(
        &self,
        name: String,
        category: AgentCategory,
        status: AgentStatus,
        description: Option<String>,
    ) -> Result<Agent> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id.to_string();
        inner.next_id += 1;

        let agent = Agent::new(id, name, category, status, description);
        inner.agents.push(agent.clone());
        self.persist(&inner).await?;

        info!("Created agent {} ({})", agent.id, agent.name);
        Ok(agent)
    }

    /// Apply a partial update to an agent. Returns `Ok(None)` when no agent
    /// has the given id.
    pub async fn update(&self, id: &str, update: AgentUpdate) -> Result<Option<Agent>> {
        let mut inner = self.inner.write().await;

        let Some(agent) = inner.agents.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            agent.name = name;
        }
        if let Some(category) = update.category {
            agent.category = category;
        }
        if let Some(status) = update.status {
            agent.status = status;
        }
        if let Some(description) = update.description {
            agent.description = Some(description);
        }

        let updated = agent.clone();
        self.persist(&inner).await?;

        debug!("Updated agent {}", updated.id);
        Ok(Some(updated))
    }

    /// Remove an agent, returning the removed record. Ids are never reused:
    /// the counter only moves forward.
    pub async fn delete(&self, id: &str) -> Result<Option<Agent>> {
        let mut inner = self.inner.write().await;

        let Some(pos) = inner.agents.iter().position(|a| a.id == id) else {
            return Ok(None);
        };

        let removed = inner.agents.remove(pos);
        self.persist(&inner).await?;

        info!("Deleted agent {} ({})", removed.id, removed.name);
        Ok(Some(removed))
    }

    /// Make sure the hotel Q&A agent exists, seeding it on first run.
    ///
    /// Recognizes records under either of the hotel display names, so a
    /// store created before the rename is left alone.
    pub async fn ensure_hotel_agent(&self) -> Result<Agent> {
        {
            let inner = self.inner.read().await;
            if let Some(existing) = inner.agents.iter().find(|a| is_hotel_agent(a)) {
                debug!(
                    "Hotel Q&A agent already present: {} ({})",
                    existing.name, existing.id
                );
                return Ok(existing.clone());
            }
        }

        let agent = self
            .create(
                HOTEL_AGENT_NAME.to_string(),
                AgentCategory::Support,
                AgentStatus::Active,
                Some(HOTEL_AGENT_DESCRIPTION.to_string()),
            )
            .await?;

        info!("Seeded hotel Q&A agent with id {}", agent.id);
        Ok(agent)
    }

    async fn persist(&self, inner: &StoreInner) -> Result<()> {
        let file = StoreFile {
            agents: &inner.agents,
            metadata: StoreMetadata {
                next_id: inner.next_id,
                last_updated: Utc::now(),
                version: STORE_VERSION,
            },
        };

        let json =
            serde_json::to_string_pretty(&file).context("Failed to serialize agent store")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create store directory {}", parent.display())
                })?;
            }
        }

        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write agent store to {}", self.path.display()))?;

        debug!(
            "Persisted {} agents to {}",
            inner.agents.len(),
            self.path.display()
        );
        Ok(())
    }
}

async fn load_file(path: &Path) -> Result<StoreInner> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .context("Failed to read agent store")?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Agent store is not valid JSON")?;

    let agents: Vec<Agent> = value
        .get("agents")
        .and_then(serde_json::Value::as_array)
        .map(|records| {
            records
                .iter()
                .filter_map(|record| match serde_json::from_value(record.clone()) {
                    Ok(agent) => Some(agent),
                    Err(e) => {
                        warn!("Skipping malformed agent record: {}", e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let stored_next = value
        .pointer("/metadata/nextId")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(1);

    // Non-numeric ids can only come from hand-edited files; they are kept
    // as records but never advance the counter.
    let max_id = agents
        .iter()
        .filter_map(|a| a.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let next_id = stored_next.max(max_id + 1);

    debug!("Loaded {} agents, next id {}", agents.len(), next_id);
    Ok(StoreInner { agents, next_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::HOTEL_AGENT_NAMES;

    async fn open_store(dir: &tempfile::TempDir) -> AgentStore {
        AgentStore::open(dir.path().join("agents.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let a = store
            .create("First".into(), AgentCategory::Sales, AgentStatus::Active, None)
            .await
            .unwrap();
        let b = store
            .create("Second".into(), AgentCategory::Support, AgentStatus::Inactive, None)
            .await
            .unwrap();

        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "First");
        assert_eq!(listed[1].name, "Second");
    }

    #[tokio::test]
    async fn test_get_update_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let agent = store
            .create(
                "Helper".into(),
                AgentCategory::Support,
                AgentStatus::Active,
                Some("original".into()),
            )
            .await
            .unwrap();

        let fetched = store.get(&agent.id).await.unwrap();
        assert_eq!(fetched.name, "Helper");

        let updated = store
            .update(
                &agent.id,
                AgentUpdate {
                    name: Some("Renamed".into()),
                    status: Some(AgentStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, AgentStatus::Inactive);
        // Untouched fields survive a partial update.
        assert_eq!(updated.category, AgentCategory::Support);
        assert_eq!(updated.description.as_deref(), Some("original"));

        let removed = store.delete(&agent.id).await.unwrap().unwrap();
        assert_eq!(removed.id, agent.id);
        assert_eq!(removed.name, "Renamed");
        assert!(store.get(&agent.id).await.is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_agent() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let updated = store
            .update("999", AgentUpdate::default())
            .await
            .unwrap();
        assert!(updated.is_none());

        let removed = store.delete("999").await.unwrap();
        assert!(removed.is_none());
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");

        {
            let store = AgentStore::open(&path).await.unwrap();
            store
                .create("Keeper".into(), AgentCategory::Marketing, AgentStatus::Active, None)
                .await
                .unwrap();
        }

        let reopened = AgentStore::open(&path).await.unwrap();
        let listed = reopened.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Keeper");
        assert_eq!(listed[0].category, AgentCategory::Marketing);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_never_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");

        {
            let store = AgentStore::open(&path).await.unwrap();
            store
                .create("One".into(), AgentCategory::Sales, AgentStatus::Active, None)
                .await
                .unwrap();
            let two = store
                .create("Two".into(), AgentCategory::Sales, AgentStatus::Active, None)
                .await
                .unwrap();
            store.delete(&two.id).await.unwrap();
        }

        let reopened = AgentStore::open(&path).await.unwrap();
        let three = reopened
            .create("Three".into(), AgentCategory::Sales, AgentStatus::Active, None)
            .await
            .unwrap();
        assert_eq!(three.id, "3");
    }

    #[tokio::test]
    async fn test_malformed_records_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");

        std::fs::write(
            &path,
            r#"{
                "agents": [
                    {
                        "id": "1",
                        "name": "Valid",
                        "type": "Sales",
                        "status": "Active",
                        "createdAt": "2024-01-01T00:00:00Z"
                    },
                    {
                        "id": "2",
                        "name": "Broken",
                        "type": "NotACategory",
                        "status": "Active",
                        "createdAt": "2024-01-01T00:00:00Z"
                    },
                    "not even an object"
                ]
            }"#,
        )
        .unwrap();

        let store = AgentStore::open(&path).await.unwrap();
        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Valid");

        // Counter still clears the highest surviving numeric id.
        let created = store
            .create("New".into(), AgentCategory::Sales, AgentStatus::Active, None)
            .await
            .unwrap();
        assert_eq!(created.id, "2");
    }

    #[tokio::test]
    async fn test_counter_clamps_above_existing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");

        // Stale metadata pointing below an existing id must not cause a
        // duplicate assignment.
        std::fs::write(
            &path,
            r#"{
                "agents": [
                    {
                        "id": "7",
                        "name": "Late Arrival",
                        "type": "Support",
                        "status": "Active",
                        "createdAt": "2024-01-01T00:00:00Z"
                    }
                ],
                "metadata": { "nextId": 2, "lastUpdated": "2024-01-01T00:00:00Z", "version": "1.0.0" }
            }"#,
        )
        .unwrap();

        let store = AgentStore::open(&path).await.unwrap();
        let created = store
            .create("Next".into(), AgentCategory::Sales, AgentStatus::Active, None)
            .await
            .unwrap();
        assert_eq!(created.id, "8");
    }

    #[tokio::test]
    async fn test_file_uses_wire_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");

        let store = AgentStore::open(&path).await.unwrap();
        store
            .create(
                "Wire Check".into(),
                AgentCategory::Sales,
                AgentStatus::Active,
                Some("desc".into()),
            )
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["agents"][0]["type"], "Sales");
        assert_eq!(value["agents"][0]["status"], "Active");
        assert!(value["agents"][0]["createdAt"].is_string());
        assert_eq!(value["metadata"]["nextId"], 2);
        assert_eq!(value["metadata"]["version"], "1.0.0");
        assert!(value["metadata"]["lastUpdated"].is_string());
    }

    #[tokio::test]
    async fn test_ensure_hotel_agent_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let seeded = store.ensure_hotel_agent().await.unwrap();
        assert_eq!(seeded.name, HOTEL_AGENT_NAME);
        assert_eq!(seeded.category, AgentCategory::Support);
        assert_eq!(seeded.status, AgentStatus::Active);

        let again = store.ensure_hotel_agent().await.unwrap();
        assert_eq!(again.id, seeded.id);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_hotel_agent_accepts_historical_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let legacy_name = HOTEL_AGENT_NAMES
            .iter()
            .find(|n| **n != HOTEL_AGENT_NAME)
            .unwrap();
        store
            .create(
                (*legacy_name).to_string(),
                AgentCategory::Support,
                AgentStatus::Active,
                None,
            )
            .await
            .unwrap();

        let found = store.ensure_hotel_agent().await.unwrap();
        assert_eq!(found.name, *legacy_name);
        assert_eq!(store.list().await.len(), 1);
    }
}
