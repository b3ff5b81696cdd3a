//! Scheduler error types.

use rota_state::{AgentId, CampaignId, HearingId};
use thiserror::Error;

use crate::pool::PoolKind;

/// Errors that can occur during scheduling operations.
///
/// None of these are retried internally; store failures propagate unchanged
/// through the `State` variant.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("campaign not found: {0}")]
    CampaignNotFound(CampaignId),

    #[error("campaign has no hearings to schedule: {0}")]
    EmptyCampaign(CampaignId),

    #[error("hearing not found: {0}")]
    HearingNotFound(HearingId),

    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    #[error("hearing {0} has no agent assigned to move")]
    HearingUnassigned(HearingId),

    #[error("agent pool {pool} exhausted: rank {rank} requested but pool holds {size} agents")]
    PoolExhausted {
        pool: PoolKind,
        rank: usize,
        size: usize,
    },

    #[error("roster store error: {0}")]
    State(#[from] rota_state::StateError),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
