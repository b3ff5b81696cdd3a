//! RosterStore — redb-backed persistence for rota.
//!
//! Provides typed CRUD operations over hearings, agents, and campaigns.
//! All values are JSON-serialized into redb's `&[u8]` value columns. The
//! store supports both on-disk and in-memory backends (the latter for
//! testing).
//!
//! Ordering contract: `list_hearings_for_campaign` returns hearings in
//! ascending id order. The assignment engine's grouping and fairness
//! outcomes depend on this order, so it is part of the store's contract
//! rather than an incidental property of the backend.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::tables::*;
use crate::types::*;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe roster store backed by redb.
#[derive(Clone)]
pub struct RosterStore {
    db: Arc<Database>,
}

impl RosterStore {
    /// Open (or create) a persistent roster store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "roster store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory roster store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory roster store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(HEARINGS).map_err(map_err!(Table))?;
        txn.open_table(AGENTS).map_err(map_err!(Table))?;
        txn.open_table(CAMPAIGNS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Hearings ───────────────────────────────────────────────────

    /// Insert or update a hearing.
    pub fn put_hearing(&self, hearing: &Hearing) -> StateResult<()> {
        let key = hearing.table_key();
        let value = serde_json::to_vec(hearing).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(HEARINGS).map_err(map_err!(Table))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(hearing = hearing.id, "hearing stored");
        Ok(())
    }

    /// Get a hearing by id.
    pub fn get_hearing(&self, id: HearingId) -> StateResult<Option<Hearing>> {
        let key = hearing_key(id);
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(HEARINGS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let hearing: Hearing =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(hearing))
            }
            None => Ok(None),
        }
    }

    /// List all hearings of a campaign, ascending by id.
    pub fn list_hearings_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> StateResult<Vec<Hearing>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(HEARINGS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let hearing: Hearing =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            if hearing.campaign_id == campaign_id {
                results.push(hearing);
            }
        }
        Ok(results)
    }

    /// Delete a hearing by id. Returns true if it existed.
    pub fn delete_hearing(&self, id: HearingId) -> StateResult<bool> {
        let key = hearing_key(id);
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(HEARINGS).map_err(map_err!(Table))?;
            existed = table.remove(key.as_str()).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(existed)
    }

    /// Delete all hearings of a campaign. Returns the number deleted.
    pub fn delete_hearings_for_campaign(&self, campaign_id: CampaignId) -> StateResult<u32> {
        // Collect keys in a read transaction first.
        let keys: Vec<String> = {
            let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
            let table = txn.open_table(HEARINGS).map_err(map_err!(Table))?;
            let mut keys = Vec::new();
            for entry in table.iter().map_err(map_err!(Read))? {
                let (key, value) = entry.map_err(map_err!(Read))?;
                let hearing: Hearing =
                    serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
                if hearing.campaign_id == campaign_id {
                    keys.push(key.value().to_string());
                }
            }
            keys
        };
        // Delete in a write transaction.
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let count = keys.len() as u32;
        {
            let mut table = txn.open_table(HEARINGS).map_err(map_err!(Table))?;
            for key in &keys {
                table.remove(key.as_str()).map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(campaign = campaign_id, count, "campaign hearings deleted");
        Ok(count)
    }

    // ── Agents ─────────────────────────────────────────────────────

    /// Insert or update an agent.
    pub fn put_agent(&self, agent: &Agent) -> StateResult<()> {
        let key = agent.table_key();
        let value = serde_json::to_vec(agent).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(
            agent = agent.id,
            balance = agent.balance,
            weighted = agent.weighted_balance,
            "agent stored"
        );
        Ok(())
    }

    /// Get an agent by id.
    pub fn get_agent(&self, id: AgentId) -> StateResult<Option<Agent>> {
        let key = agent_key(id);
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let agent: Agent =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(agent))
            }
            None => Ok(None),
        }
    }

    /// List all agents, ascending by id.
    pub fn list_agents(&self) -> StateResult<Vec<Agent>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let agent: Agent =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(agent);
        }
        Ok(results)
    }

    /// List active agents across both roles, ascending by weighted balance.
    /// The sort is stable: ties keep ascending id order.
    pub fn list_active_agents(&self) -> StateResult<Vec<Agent>> {
        let mut agents: Vec<Agent> = self
            .list_agents()?
            .into_iter()
            .filter(Agent::is_active)
            .collect();
        agents.sort_by_key(|a| a.weighted_balance);
        Ok(agents)
    }

    /// List active agents of one role, ascending by weighted balance.
    /// Same stable-tie behavior as [`list_active_agents`](Self::list_active_agents).
    pub fn list_active_agents_by_role(&self, role: Role) -> StateResult<Vec<Agent>> {
        let mut agents: Vec<Agent> = self
            .list_agents()?
            .into_iter()
            .filter(|a| a.is_active() && a.role == role)
            .collect();
        agents.sort_by_key(|a| a.weighted_balance);
        Ok(agents)
    }

    /// Delete an agent by id. Returns true if it existed.
    pub fn delete_agent(&self, id: AgentId) -> StateResult<bool> {
        let key = agent_key(id);
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
            existed = table.remove(key.as_str()).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(existed)
    }

    // ── Campaigns ──────────────────────────────────────────────────

    /// Insert or update a campaign.
    pub fn put_campaign(&self, campaign: &Campaign) -> StateResult<()> {
        let key = campaign.table_key();
        let value = serde_json::to_vec(campaign).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(CAMPAIGNS).map_err(map_err!(Table))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(campaign = campaign.id, status = ?campaign.status, "campaign stored");
        Ok(())
    }

    /// Get a campaign by id.
    pub fn get_campaign(&self, id: CampaignId) -> StateResult<Option<Campaign>> {
        let key = campaign_key(id);
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(CAMPAIGNS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let campaign: Campaign =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(campaign))
            }
            None => Ok(None),
        }
    }

    /// List all campaigns, ascending by id.
    pub fn list_campaigns(&self) -> StateResult<Vec<Campaign>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(CAMPAIGNS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let campaign: Campaign =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(campaign);
        }
        Ok(results)
    }

    /// Delete a campaign by id. Returns true if it existed. The campaign's
    /// hearings are not touched; use
    /// [`delete_hearings_for_campaign`](Self::delete_hearings_for_campaign).
    pub fn delete_campaign(&self, id: CampaignId) -> StateResult<bool> {
        let key = campaign_key(id);
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(CAMPAIGNS).map_err(map_err!(Table))?;
            existed = table.remove(key.as_str()).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(existed)
    }
}
