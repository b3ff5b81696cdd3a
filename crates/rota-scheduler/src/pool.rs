//! Ranked agent pools.
//!
//! Three pools are loaded once per scheduling run — attorneys,
//! representatives, and all active agents — each ordered ascending by
//! weighted balance (lower = more eligible). Pools are owned, index-addressed
//! collections with an explicit re-sort step; nothing re-ranks them
//! implicitly while a group is being filled.

use std::fmt;

use serde::{Deserialize, Serialize};

use rota_state::{Agent, AgentId, Role, RosterStore};

use crate::error::{SchedulerError, SchedulerResult};

/// Which of the three pools an assignment was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    Attorney,
    Representative,
    All,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoolKind::Attorney => "attorney",
            PoolKind::Representative => "representative",
            PoolKind::All => "all",
        };
        f.write_str(name)
    }
}

/// Caller's choice of which pool supplies assignments for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSelector {
    /// Attorneys only.
    Attorney,
    /// Representatives only.
    Representative,
    /// Either role, ranked across all active agents.
    Any,
}

impl RoleSelector {
    /// The pool this selector draws from.
    pub fn pool_kind(self) -> PoolKind {
        match self {
            RoleSelector::Attorney => PoolKind::Attorney,
            RoleSelector::Representative => PoolKind::Representative,
            RoleSelector::Any => PoolKind::All,
        }
    }
}

/// Rank to pick from: 0 normally, 1 when the previous group-boundary check
/// flagged a repeat.
pub fn selection_index(repeated: bool) -> usize {
    if repeated { 1 } else { 0 }
}

/// One pool of agents, ordered ascending by weighted balance.
#[derive(Debug, Clone)]
pub struct RankedPool {
    kind: PoolKind,
    agents: Vec<Agent>,
}

impl RankedPool {
    /// Wrap an already-ranked list of agents (as returned by the store).
    pub fn new(kind: PoolKind, agents: Vec<Agent>) -> Self {
        Self { kind, agents }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// The agent at `rank`, mutable so the caller can record an assignment.
    /// Fails with `PoolExhausted` when `rank` is beyond the pool — the
    /// heuristic has no fallback candidate.
    pub fn select_mut(&mut self, rank: usize) -> SchedulerResult<&mut Agent> {
        let size = self.agents.len();
        let pool = self.kind;
        self.agents
            .get_mut(rank)
            .ok_or(SchedulerError::PoolExhausted { pool, rank, size })
    }

    /// Re-sort the pool ascending by weighted balance and report whether the
    /// agent that sat at `selection_index` before the sort is now front-most.
    ///
    /// A `true` return is the repeat signal: the group just finished did not
    /// push its agent off the top, so the next group must skip one rank.
    /// The sort is stable, so agents tied on weighted balance keep their
    /// relative order.
    pub fn reorder(&mut self, selection_index: usize) -> bool {
        let previous = self.agents.get(selection_index).map(|a| a.id);
        self.agents.sort_by_key(|a| a.weighted_balance);
        match (previous, self.agents.first()) {
            (Some(id), Some(front)) => front.id == id,
            _ => false,
        }
    }

    /// Snapshot of the current ranking, front-most first.
    pub fn ranking(&self) -> Vec<(AgentId, i64)> {
        self.agents
            .iter()
            .map(|a| (a.id, a.weighted_balance))
            .collect()
    }
}

/// The three pools of one scheduling run.
#[derive(Debug, Clone)]
pub struct PoolSet {
    attorneys: RankedPool,
    representatives: RankedPool,
    all: RankedPool,
}

impl PoolSet {
    /// Load all three pools from the store, each pre-ranked ascending by
    /// weighted balance.
    pub fn load(store: &RosterStore) -> SchedulerResult<Self> {
        Ok(Self {
            attorneys: RankedPool::new(
                PoolKind::Attorney,
                store.list_active_agents_by_role(Role::Attorney)?,
            ),
            representatives: RankedPool::new(
                PoolKind::Representative,
                store.list_active_agents_by_role(Role::Representative)?,
            ),
            all: RankedPool::new(PoolKind::All, store.list_active_agents()?),
        })
    }

    pub fn pool(&self, kind: PoolKind) -> &RankedPool {
        match kind {
            PoolKind::Attorney => &self.attorneys,
            PoolKind::Representative => &self.representatives,
            PoolKind::All => &self.all,
        }
    }

    pub fn pool_mut(&mut self, kind: PoolKind) -> &mut RankedPool {
        match kind {
            PoolKind::Attorney => &mut self.attorneys,
            PoolKind::Representative => &mut self.representatives,
            PoolKind::All => &mut self.all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_state::AgentStatus;

    fn agent(id: AgentId, balance: i64, weight: i64) -> Agent {
        let mut a = Agent::new(id, format!("agent-{id}"), Role::Attorney, weight);
        for _ in 0..balance {
            a.record_assignment();
        }
        a
    }

    #[test]
    fn selection_index_is_zero_or_one() {
        assert_eq!(selection_index(false), 0);
        assert_eq!(selection_index(true), 1);
    }

    #[test]
    fn select_beyond_pool_is_exhausted() {
        let mut pool = RankedPool::new(PoolKind::All, vec![agent(1, 0, 1)]);

        assert!(pool.select_mut(0).is_ok());
        let err = pool.select_mut(1).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::PoolExhausted { pool: PoolKind::All, rank: 1, size: 1 }
        ));
    }

    #[test]
    fn reorder_flags_repeat_when_front_survives_tie() {
        // Front agent ends tied with the runner-up; the stable sort keeps it
        // in front, which must be reported as a repeat.
        let mut pool = RankedPool::new(
            PoolKind::All,
            vec![agent(1, 1, 1), agent(2, 1, 1)],
        );

        assert!(pool.reorder(0));
        assert_eq!(pool.ranking()[0].0, 1);
    }

    #[test]
    fn reorder_clears_repeat_when_front_is_overtaken() {
        // Agent 1 accumulated more weighted balance than agent 2, so the
        // re-sort moves agent 2 to the front.
        let mut pool = RankedPool::new(
            PoolKind::All,
            vec![agent(1, 3, 1), agent(2, 1, 1)],
        );

        assert!(!pool.reorder(0));
        assert_eq!(pool.ranking()[0].0, 2);
    }

    #[test]
    fn reorder_tracks_the_selection_index_not_the_front() {
        // A repeat was flagged last time, so rank 1 supplied the last group.
        // Agent 2 (rank 1) is lighter and becomes front-most: repeat again.
        let mut pool = RankedPool::new(
            PoolKind::All,
            vec![agent(1, 2, 1), agent(2, 1, 1)],
        );

        assert!(pool.reorder(1));
        assert_eq!(pool.ranking()[0].0, 2);
    }

    #[test]
    fn reorder_on_empty_pool_reports_no_repeat() {
        let mut pool = RankedPool::new(PoolKind::Attorney, Vec::new());
        assert!(!pool.reorder(0));
    }

    #[test]
    fn pool_set_loads_ranked_and_role_scoped() {
        let store = RosterStore::open_in_memory().unwrap();
        store.put_agent(&agent(1, 2, 1)).unwrap();
        store.put_agent(&agent(2, 0, 1)).unwrap();

        let mut rep = Agent::new(3, "Carla", Role::Representative, 1);
        rep.record_assignment();
        store.put_agent(&rep).unwrap();

        let mut inactive = Agent::new(4, "Davi", Role::Attorney, 1);
        inactive.status = AgentStatus::Inactive;
        store.put_agent(&inactive).unwrap();

        let pools = PoolSet::load(&store).unwrap();
        assert_eq!(pools.pool(PoolKind::Attorney).len(), 2);
        assert_eq!(pools.pool(PoolKind::Representative).len(), 1);
        assert_eq!(pools.pool(PoolKind::All).len(), 3);

        // Ranked ascending by weighted balance across roles.
        let ranking = pools.pool(PoolKind::All).ranking();
        assert_eq!(ranking[0], (2, 0));
        assert_eq!(ranking[1], (3, 1));
        assert_eq!(ranking[2], (1, 2));
    }
}
