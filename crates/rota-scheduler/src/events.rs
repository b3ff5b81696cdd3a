//! Structured schedule events.
//!
//! The engine surfaces its state transitions (group boundaries, pool
//! re-ranks, repeat decisions, individual assignments) as events on an
//! optional observer. Observation is side-effect-free for the algorithm:
//! the same schedule is produced whether or not anyone is listening.

use serde::Serialize;

use rota_state::{AgentId, CampaignId, HearingId};

use crate::pool::PoolKind;

/// One state transition inside a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleEvent {
    /// The campaign was flagged scheduled, before any assignment happened.
    CampaignMarkedScheduled { campaign_id: CampaignId },
    /// The walk crossed into a new (date, room, shift) group.
    GroupBoundary { hearing_id: HearingId },
    /// A pool was re-ranked at a group boundary. `repeat_flagged` is the
    /// anti-repeat decision for the next group; `ranking` is the pool
    /// snapshot after the sort, front-most first, as
    /// (agent id, weighted balance) pairs.
    PoolReordered {
        pool: PoolKind,
        repeat_flagged: bool,
        ranking: Vec<(AgentId, i64)>,
    },
    /// One hearing was linked to an agent drawn at `rank` from `pool`.
    HearingAssigned {
        hearing_id: HearingId,
        agent_id: AgentId,
        rank: usize,
        pool: PoolKind,
    },
}

/// Subscriber for [`ScheduleEvent`]s. All methods default to no-ops.
pub trait ScheduleObserver {
    fn on_event(&mut self, _event: &ScheduleEvent) {}
}

/// Observer that discards every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ScheduleObserver for NoopObserver {}

/// Observer that records every event in order, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<ScheduleEvent>,
}

impl ScheduleObserver for EventLog {
    fn on_event(&mut self, event: &ScheduleEvent) {
        self.events.push(event.clone());
    }
}
